use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::ExerciseService;
use crate::middlewares::RequireJWT;
use crate::models::exercises::requests::UpdateExerciseRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{CourseAccess, ensure_in_course};
use crate::utils::validate::validate_exercise_name;

pub async fn update_exercise(
    service: &ExerciseService,
    request: &HttpRequest,
    exercise_id: i64,
    update_data: UpdateExerciseRequest,
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
    if let Err(msg) = validate_exercise_name(&update_data.name) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            msg,
        )));
    }

    // 查询练习信息，权限按其所属课程判定
    let exercise = match storage.get_exercise_by_id(exercise_id).await {
        Ok(Some(exercise)) => exercise,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ExerciseNotFound,
                "Exercise not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get exercise information: {e}"),
                )),
            );
        }
    };

    // 权限校验：必须是所属课程内的教师
    if let Err(resp) =
        ensure_in_course(&storage, exercise.course_id, &username, CourseAccess::Teacher).await
    {
        return Ok(resp);
    }

    // 仅覆盖练习名称
    match storage.update_exercise(exercise_id, update_data).await {
        Ok(Some(exercise)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            exercise,
            "Exercise updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ExerciseNotFound,
            "Exercise not found",
        ))),
        Err(e) => {
            error!("Exercise update failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::ExerciseUpdateFailed,
                    format!("Exercise update failed: {e}"),
                )),
            )
        }
    }
}
