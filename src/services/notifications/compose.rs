//! 通知收件人解析与内容组装

use std::sync::Arc;

use crate::errors::Result;
use crate::models::notifications::entities::NotificationEvent;
use crate::models::users::entities::{User, UserRole};
use crate::services::realtime::personal_room;
use crate::storage::Storage;

use super::mailer::OutgoingEmail;

/// 事件的收件人
#[derive(Debug, Clone, Default)]
pub struct Audience {
    pub recipients: Vec<User>,
}

/// 一次分发要做的全部投递
#[derive(Debug, Clone)]
pub struct DeliveryPlan {
    pub event: &'static str,
    pub data: serde_json::Value,
    pub emails: Vec<OutgoingEmail>,
    pub rooms: Vec<String>,
}

async fn enrolled_students(storage: &Arc<dyn Storage>, course_id: i64) -> Result<Vec<User>> {
    let student_ids: Vec<i64> = storage
        .list_course_enrollments(course_id)
        .await?
        .into_iter()
        .map(|e| e.student_id)
        .collect();
    storage.get_users_by_ids(&student_ids).await
}

async fn single_user(storage: &Arc<dyn Storage>, user_id: i64) -> Result<Vec<User>> {
    Ok(storage.get_user_by_id(user_id).await?.into_iter().collect())
}

/// 查询事件的收件人
pub async fn resolve_audience(
    storage: &Arc<dyn Storage>,
    event: &NotificationEvent,
) -> Result<Audience> {
    let recipients = match event {
        NotificationEvent::CourseRequestCreated { .. } => {
            storage.list_users(Some(UserRole::Admin)).await?
        }
        NotificationEvent::CourseRequestApproved { request }
        | NotificationEvent::CourseRequestRejected { request } => {
            single_user(storage, request.professor_id).await?
        }
        NotificationEvent::CourseMaterialUploaded { course_id, .. } => {
            enrolled_students(storage, *course_id).await?
        }
        NotificationEvent::StudentEnrolled { student_id, .. } => {
            single_user(storage, *student_id).await?
        }
        NotificationEvent::TaskCreated { task } => enrolled_students(storage, task.course_id).await?,
        NotificationEvent::TaskSubmitted { professor_id, .. } => {
            single_user(storage, *professor_id).await?
        }
        NotificationEvent::SubmissionGraded { submission, .. } => {
            single_user(storage, submission.student_id).await?
        }
    };

    Ok(Audience { recipients })
}

fn subject_and_body(event: &NotificationEvent, recipient: &User) -> (String, String) {
    match event {
        NotificationEvent::CourseRequestCreated { request } => (
            format!("New course request: {}", request.name),
            format!(
                "Professor {} requested the course \"{}\".\n\n{}",
                request.professor_name, request.name, request.description
            ),
        ),
        NotificationEvent::CourseRequestApproved { request } => (
            format!("Course request approved: {}", request.name),
            format!(
                "Hello {}, your course \"{}\" has been approved and is now available.",
                recipient.first_name, request.name
            ),
        ),
        NotificationEvent::CourseRequestRejected { request } => (
            format!("Course request rejected: {}", request.name),
            format!(
                "Hello {}, your course \"{}\" has been rejected.\nReason: {}",
                recipient.first_name,
                request.name,
                request.rejection_reason.as_deref().unwrap_or("-")
            ),
        ),
        NotificationEvent::CourseMaterialUploaded {
            course_name,
            file_name,
            ..
        } => (
            format!("New material in {course_name}"),
            format!(
                "Hello {}, the file \"{}\" has been uploaded to {}.",
                recipient.first_name, file_name, course_name
            ),
        ),
        NotificationEvent::StudentEnrolled {
            course_name,
            course_description,
            professor_name,
            ..
        } => (
            format!("You have been enrolled in {course_name}"),
            format!(
                "Hello {}, professor {} enrolled you in {}.\n\n{}",
                recipient.first_name, professor_name, course_name, course_description
            ),
        ),
        NotificationEvent::TaskCreated { task } => (
            format!("New task in {}: {}", task.course_name, task.title),
            format!(
                "Hello {}, a new task \"{}\" was published in {}.\nDeadline: {}",
                recipient.first_name,
                task.title,
                task.course_name,
                task.deadline.to_rfc3339()
            ),
        ),
        NotificationEvent::TaskSubmitted {
            submission,
            course_name,
            ..
        } => (
            format!("New submission for {}", submission.task_title),
            format!(
                "{} submitted {} for \"{}\" in {}.",
                submission.student_name, submission.file_name, submission.task_title, course_name
            ),
        ),
        NotificationEvent::SubmissionGraded {
            submission,
            course_name,
        } => (
            format!("Your submission for {} was graded", submission.task_title),
            format!(
                "Hello {}, your submission for \"{}\" in {} received the grade {}/5.\nComment: {}",
                recipient.first_name,
                submission.task_title,
                course_name,
                submission
                    .grade
                    .map(|g| g.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                submission.comment.as_deref().unwrap_or("-")
            ),
        ),
    }
}

fn rooms_for(event: &NotificationEvent, audience: &Audience) -> Vec<String> {
    match event {
        NotificationEvent::CourseRequestCreated { .. } => {
            vec![UserRole::Admin.room().to_string()]
        }
        NotificationEvent::CourseRequestApproved { request }
        | NotificationEvent::CourseRequestRejected { request } => vec![
            personal_room(request.professor_id),
            UserRole::Admin.room().to_string(),
        ],
        _ => audience
            .recipients
            .iter()
            .map(|user| personal_room(user.id))
            .collect(),
    }
}

/// 根据事件与收件人组装投递计划
pub fn compose(event: &NotificationEvent, audience: &Audience) -> DeliveryPlan {
    let emails = audience
        .recipients
        .iter()
        .map(|recipient| {
            let (subject, body) = subject_and_body(event, recipient);
            OutgoingEmail {
                to: recipient.email.clone(),
                subject,
                body,
            }
        })
        .collect();

    DeliveryPlan {
        event: event.event_name(),
        data: serde_json::to_value(event).unwrap_or_default(),
        emails,
        rooms: rooms_for(event, audience),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::course_requests::entities::{CourseRequest, CourseRequestStatus};
    use crate::models::submissions::entities::TaskSubmission;
    use chrono::Utc;

    fn user(id: i64, role: UserRole, email: &str) -> User {
        User {
            id,
            first_name: format!("First{id}"),
            last_name: format!("Last{id}"),
            email: email.to_string(),
            password_hash: String::new(),
            role,
            birth_date: String::new(),
            gender: String::new(),
            country: String::new(),
            street: String::new(),
            number: String::new(),
            profile_image: None,
            created_at: Utc::now(),
        }
    }

    fn request(status: CourseRequestStatus, reason: Option<&str>) -> CourseRequest {
        CourseRequest {
            id: 10,
            professor_id: 2,
            professor_name: "Grace Hopper".to_string(),
            name: "Algorithms".to_string(),
            description: "Sorting and searching".to_string(),
            status,
            rejection_reason: reason.map(str::to_string),
            course_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_created_goes_to_every_admin() {
        let event = NotificationEvent::CourseRequestCreated {
            request: request(CourseRequestStatus::Pending, None),
        };
        let audience = Audience {
            recipients: vec![
                user(1, UserRole::Admin, "a1@example.com"),
                user(5, UserRole::Admin, "a2@example.com"),
            ],
        };

        let plan = compose(&event, &audience);
        assert_eq!(plan.event, "course_request.created");
        assert_eq!(plan.emails.len(), 2);
        assert_eq!(plan.emails[1].to, "a2@example.com");
        assert!(plan.emails[0].subject.contains("Algorithms"));
        assert_eq!(plan.rooms, vec!["admins".to_string()]);
        assert_eq!(plan.data["type"], "course_request_created");
    }

    #[test]
    fn test_rejection_carries_reason() {
        let event = NotificationEvent::CourseRequestRejected {
            request: request(CourseRequestStatus::Rejected, Some("Duplicate course")),
        };
        let audience = Audience {
            recipients: vec![user(2, UserRole::Profesor, "prof@example.com")],
        };

        let plan = compose(&event, &audience);
        assert_eq!(plan.emails.len(), 1);
        assert!(plan.emails[0].body.contains("Duplicate course"));
        assert_eq!(
            plan.rooms,
            vec!["user:2".to_string(), "admins".to_string()]
        );
    }

    #[test]
    fn test_graded_goes_to_student_room() {
        let submission = TaskSubmission {
            id: 3,
            task_id: 4,
            task_title: "Heaps".to_string(),
            student_id: 9,
            student_name: "Ada Lovelace".to_string(),
            file_path: "data:text/x-python;base64,AA==".to_string(),
            file_name: "sol.py".to_string(),
            grade: Some(5),
            comment: Some("ok".to_string()),
            submitted_at: Utc::now(),
            graded_at: Some(Utc::now()),
        };
        let event = NotificationEvent::SubmissionGraded {
            submission,
            course_name: "Algorithms".to_string(),
        };
        let audience = Audience {
            recipients: vec![user(9, UserRole::Student, "ada@example.com")],
        };

        let plan = compose(&event, &audience);
        assert_eq!(plan.event, "submission.graded");
        assert!(plan.emails[0].body.contains("5/5"));
        assert_eq!(plan.rooms, vec!["user:9".to_string()]);
    }

    #[test]
    fn test_empty_audience_sends_nothing() {
        let event = NotificationEvent::CourseMaterialUploaded {
            course_id: 1,
            course_name: "Algorithms".to_string(),
            file_name: "material.pdf".to_string(),
        };
        let plan = compose(&event, &Audience::default());
        assert!(plan.emails.is_empty());
        assert!(plan.rooms.is_empty());
    }
}
