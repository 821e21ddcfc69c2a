use serde::{Deserialize, Serialize};

use crate::models::course_requests::entities::CourseRequest;
use crate::models::submissions::entities::TaskSubmission;
use crate::models::tasks::entities::Task;

/// 状态变更事件，随业务写入一起进入发件箱
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NotificationEvent {
    CourseRequestCreated {
        request: CourseRequest,
    },
    CourseRequestApproved {
        request: CourseRequest,
    },
    CourseRequestRejected {
        request: CourseRequest,
    },
    CourseMaterialUploaded {
        course_id: i64,
        course_name: String,
        file_name: String,
    },
    StudentEnrolled {
        course_id: i64,
        course_name: String,
        course_description: String,
        professor_name: String,
        student_id: i64,
    },
    TaskCreated {
        task: Task,
    },
    TaskSubmitted {
        submission: TaskSubmission,
        course_name: String,
        professor_id: i64,
    },
    SubmissionGraded {
        submission: TaskSubmission,
        course_name: String,
    },
}

impl NotificationEvent {
    /// 实时通道中的事件名
    pub fn event_name(&self) -> &'static str {
        match self {
            NotificationEvent::CourseRequestCreated { .. } => "course_request.created",
            NotificationEvent::CourseRequestApproved { .. } => "course_request.approved",
            NotificationEvent::CourseRequestRejected { .. } => "course_request.rejected",
            NotificationEvent::CourseMaterialUploaded { .. } => "course.material_uploaded",
            NotificationEvent::StudentEnrolled { .. } => "course.student_enrolled",
            NotificationEvent::TaskCreated { .. } => "task.created",
            NotificationEvent::TaskSubmitted { .. } => "task.submitted",
            NotificationEvent::SubmissionGraded { .. } => "submission.graded",
        }
    }
}

/// 发件箱中已领取的一条记录
#[derive(Debug, Clone)]
pub struct OutboxEntry {
    pub id: i64,
    pub event: NotificationEvent,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
