use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::{PlatformError, Result};

// 任务状态，根据截止时间计算
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "UPPERCASE")]
#[ts(export, export_to = "../client/src/types/generated/task.ts")]
pub enum TaskStatus {
    Active,
    Closed,
}

impl TaskStatus {
    pub fn at(deadline: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        if now < deadline {
            TaskStatus::Active
        } else {
            TaskStatus::Closed
        }
    }
}

// 任务实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../client/src/types/generated/task.ts")]
pub struct Task {
    pub id: i64,
    pub course_id: i64,
    pub course_name: String,
    pub title: String,
    pub description: String,
    pub deadline: DateTime<Utc>,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
}

/// 解析截止时间
///
/// 接受 RFC 3339（带时区）或不带时区的 ISO-8601，后者按 UTC 处理。
pub fn parse_deadline(raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc());
        }
    }

    Err(PlatformError::date_parse(format!(
        "Invalid deadline format: '{raw}'"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_rfc3339_deadline() {
        let deadline = parse_deadline("2025-01-01T00:00:00Z").unwrap();
        assert_eq!(deadline, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_offset_deadline_normalizes_to_utc() {
        let deadline = parse_deadline("2025-01-01T02:00:00+02:00").unwrap();
        assert_eq!(deadline, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_naive_deadline_as_utc() {
        let deadline = parse_deadline("2025-03-15T23:59").unwrap();
        assert_eq!(deadline, Utc.with_ymd_and_hms(2025, 3, 15, 23, 59, 0).unwrap());
    }

    #[test]
    fn test_parse_invalid_deadline() {
        let err = parse_deadline("next friday").unwrap_err();
        assert_eq!(err.code(), "E006");
    }

    #[test]
    fn test_task_status() {
        let deadline = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let before = Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap();
        let after = Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap();
        assert_eq!(TaskStatus::at(deadline, before), TaskStatus::Active);
        assert_eq!(TaskStatus::at(deadline, after), TaskStatus::Closed);
    }
}
