pub mod code;
pub mod create;
pub mod delete;
pub mod list;
pub mod members;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::courses::requests::{
    CourseMembersRequest, CreateCourseRequest, UpdateCourseRequest,
};
use crate::storage::Storage;

pub struct CourseService {
    storage: Option<Arc<dyn Storage>>,
}

impl CourseService {
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

    // 获取全部课程列表
    pub async fn list_courses(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_courses(self, request).await
    }

    // 创建课程（创建者自动成为第一位成员）
    pub async fn create_course(
        &self,
        req: &HttpRequest,
        course_data: CreateCourseRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_course(self, req, course_data).await
    }

    // 更新课程信息
    pub async fn update_course(
        &self,
        req: &HttpRequest,
        course_id: i64,
        update_data: UpdateCourseRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_course(self, req, course_id, update_data).await
    }

    // 根据课程 ID 删除课程
    pub async fn delete_course(
        &self,
        req: &HttpRequest,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_course(self, req, course_id).await
    }

    // 列出课程成员
    pub async fn list_members(
        &self,
        req: &HttpRequest,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        members::list_members(self, req, course_id).await
    }

    // 批量添加课程成员
    pub async fn add_members(
        &self,
        req: &HttpRequest,
        course_id: i64,
        member_data: CourseMembersRequest,
    ) -> ActixResult<HttpResponse> {
        members::add_members(self, req, course_id, member_data).await
    }

    // 批量移除课程成员
    pub async fn remove_members(
        &self,
        req: &HttpRequest,
        course_id: i64,
        member_data: CourseMembersRequest,
    ) -> ActixResult<HttpResponse> {
        members::remove_members(self, req, course_id, member_data).await
    }

    // 获取课程分享码
    pub async fn get_share_code(
        &self,
        req: &HttpRequest,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        code::get_share_code(self, req, course_id).await
    }

    // 凭分享码获取课程并加入
    pub async fn join_by_code(&self, req: &HttpRequest, code: String) -> ActixResult<HttpResponse> {
        code::join_by_code(self, req, code).await
    }
}
