//! 课程成员存储操作
//!
//! 访问控制依赖这里的成员查询：成员记录与用户名、全局角色集合
//! 组装为 `CourseMember`，策略层只消费查询结果，不再遍历成员列表。

use super::SeaOrmStorage;
use crate::entity::course_users::{ActiveModel, Column, Entity as CourseUsers};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{CourseHubError, Result};
use crate::models::course_users::entities::CourseMember;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 按用户名查询课程成员
    pub async fn get_course_member_impl(
        &self,
        course_id: i64,
        username: &str,
    ) -> Result<Option<CourseMember>> {
        let user = Users::find()
            .filter(UserColumn::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询用户失败: {e}")))?;

        let Some(user) = user else {
            return Ok(None);
        };

        self.get_member_for_user(course_id, user.id, user.username)
            .await
    }

    /// 按用户 ID 查询课程成员
    pub async fn get_course_member_by_user_id_impl(
        &self,
        course_id: i64,
        user_id: i64,
    ) -> Result<Option<CourseMember>> {
        let user = Users::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询用户失败: {e}")))?;

        let Some(user) = user else {
            return Ok(None);
        };

        self.get_member_for_user(course_id, user.id, user.username)
            .await
    }

    async fn get_member_for_user(
        &self,
        course_id: i64,
        user_id: i64,
        username: String,
    ) -> Result<Option<CourseMember>> {
        let membership = CourseUsers::find()
            .filter(
                Condition::all()
                    .add(Column::CourseId.eq(course_id))
                    .add(Column::UserId.eq(user_id)),
            )
            .one(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询课程成员失败: {e}")))?;

        let Some(membership) = membership else {
            return Ok(None);
        };

        let roles = self.load_user_roles(user_id).await?;

        Ok(Some(CourseMember {
            id: membership.id,
            course_id: membership.course_id,
            user_id,
            username,
            roles,
            joined_at: chrono::DateTime::from_timestamp(membership.joined_at, 0)
                .unwrap_or_default(),
        }))
    }

    /// 列出课程全部成员（按加入时间排序）
    pub async fn list_course_members_impl(&self, course_id: i64) -> Result<Vec<CourseMember>> {
        let memberships = CourseUsers::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_asc(Column::JoinedAt)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询课程成员失败: {e}")))?;

        if memberships.is_empty() {
            return Ok(vec![]);
        }

        let user_ids: Vec<i64> = memberships.iter().map(|cu| cu.user_id).collect();

        let users = Users::find()
            .filter(UserColumn::Id.is_in(user_ids.clone()))
            .all(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询成员用户失败: {e}")))?;

        let mut roles = self.load_roles_for_users(&user_ids).await?;
        let usernames: std::collections::HashMap<i64, String> =
            users.into_iter().map(|u| (u.id, u.username)).collect();

        Ok(memberships
            .into_iter()
            .filter_map(|cu| {
                let username = usernames.get(&cu.user_id)?.clone();
                Some(CourseMember {
                    id: cu.id,
                    course_id: cu.course_id,
                    user_id: cu.user_id,
                    username,
                    roles: roles.remove(&cu.user_id).unwrap_or_default(),
                    joined_at: chrono::DateTime::from_timestamp(cu.joined_at, 0)
                        .unwrap_or_default(),
                })
            })
            .collect())
    }

    /// 将用户加入课程
    pub async fn enroll_user_impl(&self, course_id: i64, user_id: i64) -> Result<CourseMember> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            course_id: Set(course_id),
            user_id: Set(user_id),
            joined_at: Set(now),
            ..Default::default()
        };

        model
            .insert(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("加入课程失败: {e}")))?;

        self.get_course_member_by_user_id_impl(course_id, user_id)
            .await?
            .ok_or_else(|| CourseHubError::database_operation("加入课程后未找到成员记录"))
    }

    /// 将用户移出课程
    pub async fn remove_course_user_impl(&self, course_id: i64, user_id: i64) -> Result<bool> {
        let result = CourseUsers::delete_many()
            .filter(
                Condition::all()
                    .add(Column::CourseId.eq(course_id))
                    .add(Column::UserId.eq(user_id)),
            )
            .exec(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("移出课程失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
