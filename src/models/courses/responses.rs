use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 课程分享码响应
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../extension/src/types/generated/course.ts")]
pub struct ShareCodeResponse {
    pub share_code: String,
}
