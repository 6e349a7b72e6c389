use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::courses::requests::{
    CourseMembersRequest, CreateCourseRequest, UpdateCourseRequest,
};
use crate::services::CourseService;
use crate::utils::{SafeCourseIdI64, SafeShareCode};

// 懒加载的全局 COURSE_SERVICE 实例
static COURSE_SERVICE: Lazy<CourseService> = Lazy::new(CourseService::new_lazy);

// HTTP处理程序
pub async fn list_courses(req: HttpRequest) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_courses(&req).await
}

pub async fn create_course(
    req: HttpRequest,
    course_data: web::Json<CreateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .create_course(&req, course_data.into_inner())
        .await
}

pub async fn update_course(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    update_data: web::Json<UpdateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .update_course(&req, course_id.0, update_data.into_inner())
        .await
}

pub async fn delete_course(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.delete_course(&req, course_id.0).await
}

pub async fn list_members(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_members(&req, course_id.0).await
}

pub async fn add_members(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    member_data: web::Json<CourseMembersRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .add_members(&req, course_id.0, member_data.into_inner())
        .await
}

pub async fn remove_members(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    member_data: web::Json<CourseMembersRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .remove_members(&req, course_id.0, member_data.into_inner())
        .await
}

pub async fn get_share_code(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.get_share_code(&req, course_id.0).await
}

pub async fn join_by_code(req: HttpRequest, code: SafeShareCode) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.join_by_code(&req, code.0).await
}

// 配置路由
pub fn configure_courses_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/courses")
            .wrap(middlewares::RequireJWT)
            .service(
                // 课程目录对所有已认证用户可见；任何已认证用户都可以创建课程
                web::resource("")
                    .route(web::get().to(list_courses))
                    .route(web::post().to(create_course)),
            )
            .service(
                web::resource("/code/{code}").route(
                    web::get()
                        .to(join_by_code)
                        // 学生凭分享码加入课程，限频防止暴力枚举
                        .wrap(middlewares::RateLimit::share_code()),
                ),
            )
            .service(
                // 课程内教师才能改名或删除课程（服务层校验）
                web::resource("/{course_id}")
                    .route(web::put().to(update_course))
                    .route(web::delete().to(delete_course)),
            )
            .service(
                // 课程内教师获取分享码（服务层校验）
                web::resource("/{course_id}/code").route(web::get().to(get_share_code)),
            )
            .service(
                // 成员查看名单，教师增删成员（服务层校验）
                web::resource("/{course_id}/users")
                    .route(web::get().to(list_members))
                    .route(web::post().to(add_members))
                    .route(web::delete().to(remove_members)),
            ),
    );
}
