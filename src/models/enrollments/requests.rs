use serde::Deserialize;
use ts_rs::TS;

// 教授为学生选课
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../client/src/types/generated/enrollment.ts")]
pub struct EnrollStudentRequest {
    pub student_id: Option<i64>,
}
