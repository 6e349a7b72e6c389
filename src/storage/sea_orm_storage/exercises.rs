//! 练习存储操作

use super::SeaOrmStorage;
use crate::entity::exercises::{ActiveModel, Column, Entity as Exercises};
use crate::errors::{CourseHubError, Result};
use crate::models::exercises::{
    entities::Exercise,
    requests::{CreateExerciseRequest, UpdateExerciseRequest},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 在课程下创建练习
    pub async fn create_exercise_impl(
        &self,
        course_id: i64,
        req: CreateExerciseRequest,
    ) -> Result<Exercise> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            course_id: Set(course_id),
            name: Set(req.name),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("创建练习失败: {e}")))?;

        Ok(result.into_exercise())
    }

    /// 通过 ID 获取练习
    pub async fn get_exercise_by_id_impl(&self, exercise_id: i64) -> Result<Option<Exercise>> {
        let result = Exercises::find_by_id(exercise_id)
            .one(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询练习失败: {e}")))?;

        Ok(result.map(|m| m.into_exercise()))
    }

    /// 列出课程下的练习（按创建时间排序）
    pub async fn list_exercises_impl(&self, course_id: i64) -> Result<Vec<Exercise>> {
        let exercises = Exercises::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_asc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询练习列表失败: {e}")))?;

        Ok(exercises.into_iter().map(|m| m.into_exercise()).collect())
    }

    /// 更新练习信息（仅名称）
    pub async fn update_exercise_impl(
        &self,
        exercise_id: i64,
        update: UpdateExerciseRequest,
    ) -> Result<Option<Exercise>> {
        // 先检查练习是否存在
        let existing = self.get_exercise_by_id_impl(exercise_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            id: Set(exercise_id),
            name: Set(update.name),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("更新练习失败: {e}")))?;

        Ok(Some(result.into_exercise()))
    }

    /// 删除练习
    pub async fn delete_exercise_impl(&self, exercise_id: i64) -> Result<bool> {
        let result = Exercises::delete_by_id(exercise_id)
            .exec(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("删除练习失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
