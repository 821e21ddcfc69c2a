use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SubmissionService;
use crate::errors::PlatformError;
use crate::middlewares::RequireSession;
use crate::models::submissions::entities::parse_grade;
use crate::models::submissions::requests::GradeSubmissionRequest;
use crate::services::courses::load_owned_course;
use crate::services::tasks::load_task;
use crate::utils::validate::non_empty;

pub async fn grade_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
    data: GradeSubmissionRequest,
) -> ActixResult<HttpResponse> {
    let user_id = RequireSession::require_identity(request)?.user_id;

    let submission = service
        .storage
        .get_submission_by_id(submission_id)
        .await?
        .ok_or_else(|| PlatformError::not_found("Submission not found"))?;
    let task = load_task(&service.storage, submission.task_id).await?;
    load_owned_course(&service.storage, task.course_id, user_id).await?;

    let grade = parse_grade(data.grade.as_ref().unwrap_or(&serde_json::Value::Null))?;
    let comment = non_empty(data.comment.as_ref());

    let graded = service
        .storage
        .grade_submission(submission_id, grade, comment)
        .await?
        .ok_or_else(|| PlatformError::not_found("Submission not found"))?;
    service.notifier.wake();

    info!(
        "Submission {} graded {} by professor {}",
        submission_id, grade, user_id
    );
    Ok(HttpResponse::Ok().json(graded))
}
