use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::ExerciseService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{CourseAccess, ensure_in_course};

pub async fn list_exercises(
    service: &ExerciseService,
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
    match storage.get_course_by_id(course_id).await {
        Ok(Some(_)) => {}
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
    }

    // 权限校验：任意课程成员可以查看练习列表
    if let Err(resp) = ensure_in_course(&storage, course_id, &username, CourseAccess::Member).await
    {
        return Ok(resp);
    }

    match storage.list_exercises(course_id).await {
        Ok(exercises) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            exercises,
            "Exercises retrieved successfully",
        ))),
        Err(e) => {
            error!("Failed to list exercises: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to retrieve exercises",
                )),
            )
        }
    }
}
