use serde::Deserialize;
use ts_rs::TS;

// 创建课程请求
//
// name 长度限制 [10, 100]，在服务层入口处校验
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../extension/src/types/generated/course.ts")]
pub struct CreateCourseRequest {
    pub name: String,
}

// 更新课程请求（仅允许改名）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../extension/src/types/generated/course.ts")]
pub struct UpdateCourseRequest {
    pub name: String,
}

// 批量添加/移除课程成员请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../extension/src/types/generated/course.ts")]
pub struct CourseMembersRequest {
    pub ids: Vec<i64>,
}
