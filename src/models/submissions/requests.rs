use serde::Deserialize;
use ts_rs::TS;

// 提交任务请求
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../client/src/types/generated/submission.ts")]
pub struct SubmitTaskRequest {
    #[serde(alias = "fileRef")]
    pub file_path: Option<String>,
    pub file_name: Option<String>,
}

// 评分请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/submission.ts")]
pub struct GradeSubmissionRequest {
    pub grade: Option<serde_json::Value>,
    pub comment: Option<String>,
}
