use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::CourseService;
use crate::middlewares::RequireJWT;
use crate::models::courses::requests::CourseMembersRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{CourseAccess, ensure_in_course};
use crate::storage::Storage;

pub async fn list_members(
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

    if let Err(resp) = check_course_exists(&storage, course_id).await {
        return Ok(resp);
    }

    // 权限校验：任意课程成员可以查看名单
    if let Err(resp) = ensure_in_course(&storage, course_id, &username, CourseAccess::Member).await
    {
        return Ok(resp);
    }

    match storage.list_course_members(course_id).await {
        Ok(members) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            members,
            "Course members retrieved successfully",
        ))),
        Err(e) => {
            error!("Failed to list course members: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to retrieve course members",
                )),
            )
        }
    }
}

pub async fn add_members(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
    member_data: CourseMembersRequest,
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

    if let Err(resp) = check_course_exists(&storage, course_id).await {
        return Ok(resp);
    }

    // 权限校验：必须是课程内的教师
    if let Err(resp) = ensure_in_course(&storage, course_id, &username, CourseAccess::Teacher).await
    {
        return Ok(resp);
    }

    // 逐个登记：未知用户立刻失败，已是成员的跳过
    for user_id in &member_data.ids {
        match storage.get_user_by_id(*user_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::UserNotFound,
                    format!("User not found: {user_id}"),
                )));
            }
            Err(e) => {
                error!("Failed to get user by id: {}", e);
                return Ok(HttpResponse::InternalServerError().json(
                    ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        "Internal server error while fetching user",
                    ),
                ));
            }
        }

        let already_member = match storage
            .get_course_member_by_user_id(course_id, *user_id)
            .await
        {
            Ok(member) => member.is_some(),
            Err(e) => {
                error!("Failed to check membership: {}", e);
                return Ok(HttpResponse::InternalServerError().json(
                    ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        "Internal server error while checking membership",
                    ),
                ));
            }
        };

        if already_member {
            continue;
        }

        if let Err(e) = storage.enroll_user(course_id, *user_id).await {
            error!("Failed to enroll user {}: {}", user_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::EnrollmentFailed,
                    format!("Failed to enroll user {user_id}"),
                )),
            );
        }
    }

    info!(
        "{} member(s) processed for course {} by {}",
        member_data.ids.len(),
        course_id,
        username
    );

    respond_with_members(&storage, course_id, "Course members added successfully").await
}

pub async fn remove_members(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
    member_data: CourseMembersRequest,
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

    if let Err(resp) = check_course_exists(&storage, course_id).await {
        return Ok(resp);
    }

    // 权限校验：必须是课程内的教师
    if let Err(resp) = ensure_in_course(&storage, course_id, &username, CourseAccess::Teacher).await
    {
        return Ok(resp);
    }

    for user_id in &member_data.ids {
        if let Err(e) = storage.remove_course_user(course_id, *user_id).await {
            error!("Failed to remove user {}: {}", user_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to remove user {user_id}"),
                )),
            );
        }
    }

    respond_with_members(&storage, course_id, "Course members removed successfully").await
}

/// 课程存在性检查辅助函数
async fn check_course_exists(
    storage: &Arc<dyn Storage>,
    course_id: i64,
) -> Result<(), HttpResponse> {
    match storage.get_course_by_id(course_id).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CourseNotFound,
            "Course not found",
        ))),
        Err(e) => Err(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to get course information: {e}"),
            )),
        ),
    }
}

/// 返回最新的成员名单
async fn respond_with_members(
    storage: &Arc<dyn Storage>,
    course_id: i64,
    message: &str,
) -> ActixResult<HttpResponse> {
    match storage.list_course_members(course_id).await {
        Ok(members) => Ok(HttpResponse::Ok().json(ApiResponse::success(members, message))),
        Err(e) => {
            error!("Failed to list course members: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to retrieve course members",
                )),
            )
        }
    }
}
