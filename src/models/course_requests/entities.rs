use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 课程申请状态，只允许 PENDING -> APPROVED 或 PENDING -> REJECTED
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "UPPERCASE")]
#[ts(export, export_to = "../client/src/types/generated/course_request.ts")]
pub enum CourseRequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl CourseRequestStatus {
    pub const PENDING: &'static str = "PENDING";
    pub const APPROVED: &'static str = "APPROVED";
    pub const REJECTED: &'static str = "REJECTED";
}

impl std::fmt::Display for CourseRequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CourseRequestStatus::Pending => write!(f, "{}", Self::PENDING),
            CourseRequestStatus::Approved => write!(f, "{}", Self::APPROVED),
            CourseRequestStatus::Rejected => write!(f, "{}", Self::REJECTED),
        }
    }
}

impl std::str::FromStr for CourseRequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            Self::PENDING => Ok(CourseRequestStatus::Pending),
            Self::APPROVED => Ok(CourseRequestStatus::Approved),
            Self::REJECTED => Ok(CourseRequestStatus::Rejected),
            _ => Err(format!("Invalid course request status: {s}")),
        }
    }
}

// 课程申请实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../client/src/types/generated/course_request.ts")]
pub struct CourseRequest {
    pub id: i64,
    pub professor_id: i64,
    pub professor_name: String,
    pub name: String,
    pub description: String,
    pub status: CourseRequestStatus,
    pub rejection_reason: Option<String>,
    /// 批准后生成的课程
    pub course_id: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
