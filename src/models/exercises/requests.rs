use serde::Deserialize;
use ts_rs::TS;

// 创建练习请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../extension/src/types/generated/exercise.ts")]
pub struct CreateExerciseRequest {
    pub name: String,
}

// 更新练习请求（仅允许改名）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../extension/src/types/generated/exercise.ts")]
pub struct UpdateExerciseRequest {
    pub name: String,
}
