//! 用户存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::user_roles::{
    ActiveModel as UserRoleActiveModel, Column as UserRoleColumn, Entity as UserRoles,
};
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{CourseHubError, Result};
use crate::models::{
    PaginationInfo,
    users::{
        entities::{User, UserRole},
        requests::{CreateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};

// 注册角色展开：教师同时持有学生角色
fn expand_roles(role: &UserRole) -> Vec<UserRole> {
    match role {
        UserRole::Teacher => vec![UserRole::Student, UserRole::Teacher],
        UserRole::Student => vec![UserRole::Student],
    }
}

impl SeaOrmStorage {
    /// 查询单个用户的角色集合
    pub(crate) async fn load_user_roles(&self, user_id: i64) -> Result<Vec<UserRole>> {
        let rows = UserRoles::find()
            .filter(UserRoleColumn::UserId.eq(user_id))
            .all(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询用户角色失败: {e}")))?;

        Ok(rows
            .into_iter()
            .filter_map(|m| m.role.parse::<UserRole>().ok())
            .collect())
    }

    /// 批量查询角色集合，按用户ID分组
    pub(crate) async fn load_roles_for_users(
        &self,
        user_ids: &[i64],
    ) -> Result<HashMap<i64, Vec<UserRole>>> {
        if user_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = UserRoles::find()
            .filter(UserRoleColumn::UserId.is_in(user_ids.to_vec()))
            .all(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询用户角色失败: {e}")))?;

        let mut grouped: HashMap<i64, Vec<UserRole>> = HashMap::new();
        for row in rows {
            if let Ok(role) = row.role.parse::<UserRole>() {
                grouped.entry(row.user_id).or_default().push(role);
            }
        }
        Ok(grouped)
    }

    /// 创建用户（用户行与角色行在同一事务内写入）
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        let now = chrono::Utc::now().timestamp();
        let roles = expand_roles(&req.role);

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CourseHubError::database_operation(format!("开启事务失败: {e}")))?;

        let model = ActiveModel {
            username: Set(req.username),
            email: Set(req.email),
            password_hash: Set(req.password),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let user = model
            .insert(&txn)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("创建用户失败: {e}")))?;

        for role in &roles {
            let role_model = UserRoleActiveModel {
                user_id: Set(user.id),
                role: Set(role.to_string()),
                ..Default::default()
            };
            role_model
                .insert(&txn)
                .await
                .map_err(|e| CourseHubError::database_operation(format!("写入用户角色失败: {e}")))?;
        }

        txn.commit()
            .await
            .map_err(|e| CourseHubError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(user.into_user(roles))
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询用户失败: {e}")))?;

        match result {
            Some(model) => {
                let roles = self.load_user_roles(model.id).await?;
                Ok(Some(model.into_user(roles)))
            }
            None => Ok(None),
        }
    }

    /// 通过用户名获取用户
    pub async fn get_user_by_username_impl(&self, username: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询用户失败: {e}")))?;

        match result {
            Some(model) => {
                let roles = self.load_user_roles(model.id).await?;
                Ok(Some(model.into_user(roles)))
            }
            None => Ok(None),
        }
    }

    /// 通过邮箱获取用户
    pub async fn get_user_by_email_impl(&self, email: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询用户失败: {e}")))?;

        match result {
            Some(model) => {
                let roles = self.load_user_roles(model.id).await?;
                Ok(Some(model.into_user(roles)))
            }
            None => Ok(None),
        }
    }

    /// 通过用户名或邮箱获取用户
    pub async fn get_user_by_username_or_email_impl(
        &self,
        identifier: &str,
    ) -> Result<Option<User>> {
        let result = Users::find()
            .filter(
                Condition::any()
                    .add(Column::Username.eq(identifier))
                    .add(Column::Email.eq(identifier)),
            )
            .one(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询用户失败: {e}")))?;

        match result {
            Some(model) => {
                let roles = self.load_user_roles(model.id).await?;
                Ok(Some(model.into_user(roles)))
            }
            None => Ok(None),
        }
    }

    /// 分页列出用户
    pub async fn list_users_with_pagination_impl(
        &self,
        query: UserListQuery,
    ) -> Result<UserListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Users::find();

        // 搜索条件
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(Column::Username.contains(&escaped));
        }

        // 排序
        select = select.order_by_desc(Column::CreatedAt);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询用户总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询用户页数失败: {e}")))?;

        let users = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询用户列表失败: {e}")))?;

        let ids: Vec<i64> = users.iter().map(|u| u.id).collect();
        let mut roles = self.load_roles_for_users(&ids).await?;

        Ok(UserListResponse {
            items: users
                .into_iter()
                .map(|m| {
                    let user_roles = roles.remove(&m.id).unwrap_or_default();
                    m.into_user(user_roles)
                })
                .collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 统计用户数量
    pub async fn count_users_impl(&self) -> Result<u64> {
        let count = Users::find()
            .count(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("统计用户数量失败: {e}")))?;

        Ok(count)
    }
}
