use serde::Deserialize;
use ts_rs::TS;

// 创建任务请求
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../client/src/types/generated/task.ts")]
pub struct CreateTaskRequest {
    pub course_id: Option<i64>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub deadline: Option<String>,
}

// 任务创建数据（用于存储层）
#[derive(Debug, Clone)]
pub struct NewTask {
    pub course_id: i64,
    pub title: String,
    pub description: String,
    pub deadline: chrono::DateTime<chrono::Utc>,
}
