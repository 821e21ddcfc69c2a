use serde::Serialize;
use ts_rs::TS;

use super::entities::TaskSubmission;

// 提交结果
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/submission.ts")]
pub struct SubmitTaskResponse {
    #[serde(flatten)]
    #[ts(flatten)]
    pub submission: TaskSubmission,
    pub message: String,
}

// 提交文件下载
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../client/src/types/generated/submission.ts")]
pub struct SubmissionDownloadResponse {
    pub file_data: String,
    pub file_name: String,
    pub student_name: String,
    pub task_title: String,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}
