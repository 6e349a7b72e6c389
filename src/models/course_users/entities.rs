use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::users::entities::UserRole;

// 课程成员
//
// 成员记录携带用户名与全局角色集合，是访问控制的唯一输入：
// 课程内没有独立的成员角色。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../extension/src/types/generated/course-user.ts")]
pub struct CourseMember {
    pub id: i64,
    pub course_id: i64,
    pub user_id: i64,
    pub username: String,
    pub roles: Vec<UserRole>,
    pub joined_at: chrono::DateTime<chrono::Utc>,
}

impl CourseMember {
    /// 成员是否持有教师角色
    pub fn is_teacher(&self) -> bool {
        self.roles.contains(&UserRole::Teacher)
    }
}
