use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::{PlatformError, Result};

pub const MIN_GRADE: i64 = 1;
pub const MAX_GRADE: i64 = 5;

// 任务提交实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../client/src/types/generated/submission.ts")]
pub struct TaskSubmission {
    pub id: i64,
    pub task_id: i64,
    pub task_title: String,
    pub student_id: i64,
    pub student_name: String,
    pub file_path: String,
    pub file_name: String,
    pub grade: Option<i32>,
    pub comment: Option<String>,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub graded_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// 解析评分
///
/// 接受 JSON 整数或可解析为整数的字符串，范围 [1, 5]。
pub fn parse_grade(value: &serde_json::Value) -> Result<i32> {
    let invalid = || {
        PlatformError::validation(format!(
            "Grade must be an integer between {MIN_GRADE} and {MAX_GRADE}"
        ))
    };

    let grade = match value {
        serde_json::Value::Number(n) => n.as_i64().ok_or_else(invalid)?,
        serde_json::Value::String(s) => s.trim().parse::<i64>().map_err(|_| invalid())?,
        _ => return Err(invalid()),
    };

    if !(MIN_GRADE..=MAX_GRADE).contains(&grade) {
        return Err(invalid());
    }

    i32::try_from(grade).map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_grade_accepts_range() {
        for g in 1..=5 {
            assert_eq!(parse_grade(&json!(g)).unwrap(), g);
        }
        assert_eq!(parse_grade(&json!("4")).unwrap(), 4);
        assert_eq!(parse_grade(&json!(" 2 ")).unwrap(), 2);
    }

    #[test]
    fn test_parse_grade_rejects_out_of_range() {
        assert!(parse_grade(&json!(0)).is_err());
        assert!(parse_grade(&json!(6)).is_err());
        assert!(parse_grade(&json!(-1)).is_err());
        assert!(parse_grade(&json!("10")).is_err());
    }

    #[test]
    fn test_parse_grade_rejects_non_integers() {
        assert!(parse_grade(&json!(4.5)).is_err());
        assert!(parse_grade(&json!("five")).is_err());
        assert!(parse_grade(&json!(null)).is_err());
        assert!(parse_grade(&json!(true)).is_err());
        assert!(parse_grade(&json!([5])).is_err());
    }
}
