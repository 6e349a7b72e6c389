use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::ExerciseService;
use crate::middlewares::RequireJWT;
use crate::models::exercises::requests::CreateExerciseRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{CourseAccess, ensure_in_course};
use crate::utils::validate::validate_exercise_name;

pub async fn create_exercise(
    service: &ExerciseService,
    request: &HttpRequest,
    course_id: i64,
    exercise_data: CreateExerciseRequest,
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

    // 练习名称校验
    if let Err(msg) = validate_exercise_name(&exercise_data.name) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            msg,
        )));
    }

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

    // 权限校验：必须是课程内的教师
    if let Err(resp) = ensure_in_course(&storage, course_id, &username, CourseAccess::Teacher).await
    {
        return Ok(resp);
    }

    // 创建练习并挂到课程下
    match storage.create_exercise(course_id, exercise_data).await {
        Ok(exercise) => {
            info!(
                "Exercise {} created in course {} by {}",
                exercise.name, course_id, username
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                exercise,
                "Exercise created successfully",
            )))
        }
        Err(e) => {
            error!("Exercise creation failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::ExerciseCreationFailed,
                    format!("Exercise creation failed: {e}"),
                )),
            )
        }
    }
}
