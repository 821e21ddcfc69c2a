use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 课程实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../client/src/types/generated/course.ts")]
pub struct Course {
    pub id: i64,
    pub professor_id: i64,
    pub professor_name: String,
    pub name: String,
    pub description: String,
    pub material_path: Option<String>,
    pub material_name: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Course {
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.professor_id == user_id
    }
}
