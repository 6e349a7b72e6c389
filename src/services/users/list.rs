use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::UserService;
use crate::models::users::requests::{UserListQuery, UserQueryParams};
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_users(
    service: &UserService,
    request: &HttpRequest,
    params: UserQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // HTTP 查询参数转换为存储层查询
    let query = UserListQuery {
        page: Some(params.pagination.page),
        size: Some(params.pagination.size),
        search: params.search,
    };

    match storage.list_users_with_pagination(query).await {
        Ok(users) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            users,
            "Users retrieved successfully",
        ))),
        Err(e) => {
            error!("Failed to list users: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to retrieve users",
                )),
            )
        }
    }
}
