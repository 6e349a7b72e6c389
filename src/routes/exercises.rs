use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::exercises::requests::{CreateExerciseRequest, UpdateExerciseRequest};
use crate::services::ExerciseService;
use crate::utils::{SafeCourseIdI64, SafeExerciseIdI64};

// 懒加载的全局 EXERCISE_SERVICE 实例
static EXERCISE_SERVICE: Lazy<ExerciseService> = Lazy::new(ExerciseService::new_lazy);

// HTTP处理程序
pub async fn list_exercises(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
) -> ActixResult<HttpResponse> {
    EXERCISE_SERVICE.list_exercises(&req, course_id.0).await
}

pub async fn create_exercise(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    exercise_data: web::Json<CreateExerciseRequest>,
) -> ActixResult<HttpResponse> {
    EXERCISE_SERVICE
        .create_exercise(&req, course_id.0, exercise_data.into_inner())
        .await
}

pub async fn update_exercise(
    req: HttpRequest,
    exercise_id: SafeExerciseIdI64,
    update_data: web::Json<UpdateExerciseRequest>,
) -> ActixResult<HttpResponse> {
    EXERCISE_SERVICE
        .update_exercise(&req, exercise_id.0, update_data.into_inner())
        .await
}

pub async fn delete_exercise(
    req: HttpRequest,
    exercise_id: SafeExerciseIdI64,
) -> ActixResult<HttpResponse> {
    EXERCISE_SERVICE.delete_exercise(&req, exercise_id.0).await
}

// 配置路由
pub fn configure_exercises_routes(cfg: &mut web::ServiceConfig) {
    // 课程下的练习集合
    cfg.service(
        web::scope("/api/v1/courses/{course_id}/exercises")
            .wrap(middlewares::RequireJWT)
            .service(
                // 成员查看练习列表，课程内教师创建练习（服务层校验）
                web::resource("")
                    .route(web::get().to(list_exercises))
                    .route(web::post().to(create_exercise)),
            ),
    );

    // 单个练习，权限按其所属课程判定
    cfg.service(
        web::scope("/api/v1/exercises")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/{exercise_id}")
                    .route(web::put().to(update_exercise))
                    .route(web::delete().to(delete_exercise)),
            ),
    );
}
