//! 数据模型定义
//!
//! 业务实体、请求/响应 DTO 与统一响应包装。

pub mod auth;
pub mod common;
pub mod course_users;
pub mod courses;
pub mod exercises;
pub mod users;

pub use common::pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
pub use common::response::ApiResponse;

/// 程序启动时间（用于运行状态上报）
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 业务错误码
///
/// 前两位与 HTTP 状态码对应，后三位区分具体业务场景。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 40000,
    CourseNameInvalid = 40001,
    UserNameInvalid = 40002,
    UserEmailInvalid = 40003,
    UserPasswordInvalid = 40004,

    Unauthorized = 40100,
    AuthFailed = 40101,

    Forbidden = 40300,
    NotInCourse = 40301,

    NotFound = 40400,
    UserNotFound = 40401,
    TeacherNotFound = 40402,
    CourseNotFound = 40403,
    ExerciseNotFound = 40404,

    UserNameAlreadyExists = 40901,
    UserEmailAlreadyExists = 40902,
    CourseAlreadyExists = 40903,
    AlreadyInCourse = 40904,

    RateLimitExceeded = 42900,

    InternalServerError = 50000,
    RegisterFailed = 50001,
    CourseCreationFailed = 50002,
    CourseUpdateFailed = 50003,
    CourseDeleteFailed = 50004,
    ExerciseCreationFailed = 50005,
    ExerciseUpdateFailed = 50006,
    ExerciseDeleteFailed = 50007,
    EnrollmentFailed = 50008,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success as i32, 0);
        assert_eq!(ErrorCode::NotInCourse as i32, 40301);
        assert_eq!(ErrorCode::CourseNotFound as i32, 40403);
        assert_eq!(ErrorCode::InternalServerError as i32, 50000);
    }
}
