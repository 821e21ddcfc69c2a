use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 选课记录
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../client/src/types/generated/enrollment.ts")]
pub struct Enrollment {
    pub id: i64,
    pub course_id: i64,
    pub course_name: String,
    pub student_id: i64,
    pub student_name: String,
    pub enrolled_at: chrono::DateTime<chrono::Utc>,
}
