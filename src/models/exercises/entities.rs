use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../extension/src/types/generated/exercise.ts")]
pub struct Exercise {
    // 练习ID
    pub id: i64,
    // 所属课程ID
    pub course_id: i64,
    // 练习名称
    pub name: String,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
    // 更新时间
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
