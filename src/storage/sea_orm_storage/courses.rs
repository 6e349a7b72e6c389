//! 课程存储操作

use super::SeaOrmStorage;
use crate::entity::course_users::{
    ActiveModel as CourseUserActiveModel, Column as CourseUserColumn, Entity as CourseUsers,
};
use crate::entity::courses::{ActiveModel, Column, Entity as Courses};
use crate::errors::{CourseHubError, Result};
use crate::models::courses::{
    entities::Course,
    requests::{CreateCourseRequest, UpdateCourseRequest},
};
use crate::utils::random_code::generate_random_code;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建课程
    ///
    /// 课程行与创建者的成员关系在同一事务内写入，保证新课程
    /// 诞生时创建者已是第一位成员。
    pub async fn create_course_impl(
        &self,
        req: CreateCourseRequest,
        creator_id: i64,
    ) -> Result<Course> {
        let now = chrono::Utc::now().timestamp();
        let share_code = generate_random_code(8); // 自动生成分享码

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CourseHubError::database_operation(format!("开启事务失败: {e}")))?;

        let model = ActiveModel {
            name: Set(req.name),
            creator_id: Set(creator_id),
            share_code: Set(share_code),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let course = model
            .insert(&txn)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("创建课程失败: {e}")))?;

        let membership = CourseUserActiveModel {
            course_id: Set(course.id),
            user_id: Set(creator_id),
            joined_at: Set(now),
            ..Default::default()
        };
        membership
            .insert(&txn)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("写入创建者成员关系失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| CourseHubError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(course.into_course())
    }

    /// 通过 ID 获取课程
    pub async fn get_course_by_id_impl(&self, course_id: i64) -> Result<Option<Course>> {
        let result = Courses::find_by_id(course_id)
            .one(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 通过分享码获取课程
    pub async fn get_course_by_code_impl(&self, share_code: &str) -> Result<Option<Course>> {
        let result = Courses::find()
            .filter(Column::ShareCode.eq(share_code))
            .one(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 列出全部课程
    pub async fn list_courses_impl(&self) -> Result<Vec<Course>> {
        let courses = Courses::find()
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询课程列表失败: {e}")))?;

        Ok(courses.into_iter().map(|m| m.into_course()).collect())
    }

    /// 列出用户所属的课程
    pub async fn list_user_courses_impl(&self, user_id: i64) -> Result<Vec<Course>> {
        // 查询用户加入的课程 ID
        let memberships = CourseUsers::find()
            .filter(CourseUserColumn::UserId.eq(user_id))
            .all(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询用户课程关联失败: {e}")))?;

        let course_ids: Vec<i64> = memberships.iter().map(|cu| cu.course_id).collect();

        if course_ids.is_empty() {
            return Ok(vec![]);
        }

        let courses = Courses::find()
            .filter(Column::Id.is_in(course_ids))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询用户课程列表失败: {e}")))?;

        Ok(courses.into_iter().map(|m| m.into_course()).collect())
    }

    /// 更新课程信息（仅名称）
    pub async fn update_course_impl(
        &self,
        course_id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        // 先检查课程是否存在
        let existing = self.get_course_by_id_impl(course_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            id: Set(course_id),
            name: Set(update.name),
            updated_at: Set(now),
            ..Default::default()
        };

        model
            .update(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("更新课程失败: {e}")))?;

        self.get_course_by_id_impl(course_id).await
    }

    /// 删除课程
    pub async fn delete_course_impl(&self, course_id: i64) -> Result<bool> {
        let result = Courses::delete_by_id(course_id)
            .exec(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("删除课程失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
