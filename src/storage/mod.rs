use std::sync::Arc;

use crate::models::{
    course_users::entities::CourseMember,
    courses::{
        entities::Course,
        requests::{CreateCourseRequest, UpdateCourseRequest},
    },
    exercises::{
        entities::Exercise,
        requests::{CreateExerciseRequest, UpdateExerciseRequest},
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（连同其角色集合）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 统计用户数量
    async fn count_users(&self) -> Result<u64>;

    /// 课程管理方法
    // 创建课程，创建者在同一事务内自动成为第一位成员
    async fn create_course(&self, course: CreateCourseRequest, creator_id: i64) -> Result<Course>;
    // 通过ID获取课程信息
    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>>;
    // 通过分享码获取课程信息
    async fn get_course_by_code(&self, share_code: &str) -> Result<Option<Course>>;
    // 列出全部课程
    async fn list_courses(&self) -> Result<Vec<Course>>;
    // 列出用户所属的课程
    async fn list_user_courses(&self, user_id: i64) -> Result<Vec<Course>>;
    // 更新课程信息（仅名称）
    async fn update_course(
        &self,
        course_id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>>;
    // 删除课程（级联删除成员关系与练习）
    async fn delete_course(&self, course_id: i64) -> Result<bool>;

    /// 课程成员管理方法
    // 按用户名查询课程成员（携带角色集合），访问控制的查询入口
    async fn get_course_member(
        &self,
        course_id: i64,
        username: &str,
    ) -> Result<Option<CourseMember>>;
    // 按用户ID查询课程成员
    async fn get_course_member_by_user_id(
        &self,
        course_id: i64,
        user_id: i64,
    ) -> Result<Option<CourseMember>>;
    // 列出课程全部成员
    async fn list_course_members(&self, course_id: i64) -> Result<Vec<CourseMember>>;
    // 将用户加入课程
    async fn enroll_user(&self, course_id: i64, user_id: i64) -> Result<CourseMember>;
    // 将用户移出课程
    async fn remove_course_user(&self, course_id: i64, user_id: i64) -> Result<bool>;

    /// 练习管理方法
    // 在课程下创建练习
    async fn create_exercise(
        &self,
        course_id: i64,
        exercise: CreateExerciseRequest,
    ) -> Result<Exercise>;
    // 通过ID获取练习信息
    async fn get_exercise_by_id(&self, exercise_id: i64) -> Result<Option<Exercise>>;
    // 列出课程下的练习
    async fn list_exercises(&self, course_id: i64) -> Result<Vec<Exercise>>;
    // 更新练习信息（仅名称）
    async fn update_exercise(
        &self,
        exercise_id: i64,
        update: UpdateExerciseRequest,
    ) -> Result<Option<Exercise>>;
    // 删除练习
    async fn delete_exercise(&self, exercise_id: i64) -> Result<bool>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
