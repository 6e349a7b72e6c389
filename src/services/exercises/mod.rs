pub mod create;
pub mod delete;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::exercises::requests::{CreateExerciseRequest, UpdateExerciseRequest};
use crate::storage::Storage;

pub struct ExerciseService {
    storage: Option<Arc<dyn Storage>>,
}

impl ExerciseService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 在课程下创建练习
    pub async fn create_exercise(
        &self,
        req: &HttpRequest,
        course_id: i64,
        exercise_data: CreateExerciseRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_exercise(self, req, course_id, exercise_data).await
    }

    // 列出课程下的练习
    pub async fn list_exercises(
        &self,
        req: &HttpRequest,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_exercises(self, req, course_id).await
    }

    // 更新练习信息
    pub async fn update_exercise(
        &self,
        req: &HttpRequest,
        exercise_id: i64,
        update_data: UpdateExerciseRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_exercise(self, req, exercise_id, update_data).await
    }

    // 根据练习 ID 删除练习
    pub async fn delete_exercise(
        &self,
        req: &HttpRequest,
        exercise_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_exercise(self, req, exercise_id).await
    }
}
