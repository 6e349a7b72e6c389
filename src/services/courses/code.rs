use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::CourseService;
use crate::middlewares::RequireJWT;
use crate::models::courses::responses::ShareCodeResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{CourseAccess, ensure_in_course};

pub async fn get_share_code(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let username = match RequireJWT::extract_username(request) {
        Some(name) => name,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized: missing user identity",
            )));
        }
    };

    // 查询课程信息
    let course = match storage.get_course_by_id(course_id).await {
        Ok(Some(course)) => course,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "Course not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get course information: {e}"),
                )),
            );
        }
    };

    // 权限校验：只有课程内的教师可以查看分享码
    if let Err(resp) = ensure_in_course(&storage, course_id, &username, CourseAccess::Teacher).await
    {
        return Ok(resp);
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        ShareCodeResponse {
            share_code: course.share_code,
        },
        "Share code retrieved successfully",
    )))
}

pub async fn join_by_code(
    service: &CourseService,
    request: &HttpRequest,
    code: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized: missing user identity",
            )));
        }
    };

    // 凭分享码解析课程
    let course = match storage.get_course_by_code(&code).await {
        Ok(Some(course)) => course,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "Course not found or share code is invalid",
            )));
        }
        Err(e) => {
            error!("Error getting course by share code: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to resolve share code",
                )),
            );
        }
    };

    // 已是成员则直接返回课程
    match storage
        .get_course_member_by_user_id(course.id, user.id)
        .await
    {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Ok().json(ApiResponse::success(
                course,
                "User is already in this course",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            error!("Failed to check membership: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while checking membership",
                )),
            );
        }
    }

    match storage.enroll_user(course.id, user.id).await {
        Ok(_) => {
            info!("User {} joined course {}", user.username, course.name);
            Ok(HttpResponse::Ok().json(ApiResponse::success(course, "Course joined successfully")))
        }
        Err(e) => {
            error!("Error joining course: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::EnrollmentFailed,
                    "Failed to join course",
                )),
            )
        }
    }
}
