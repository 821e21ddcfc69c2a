use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::errors::PlatformError;
use crate::middlewares::RequireSession;
use crate::services::courses::load_owned_course;
use crate::services::tasks::load_task;

pub async fn list_task_submissions(
    service: &SubmissionService,
    request: &HttpRequest,
    task_id: i64,
) -> ActixResult<HttpResponse> {
    let user_id = RequireSession::require_identity(request)?.user_id;

    let task = load_task(&service.storage, task_id).await?;
    load_owned_course(&service.storage, task.course_id, user_id).await?;

    let submissions = service.storage.list_task_submissions(task_id).await?;
    Ok(HttpResponse::Ok().json(submissions))
}

pub async fn list_my_submissions(
    service: &SubmissionService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let student_id = RequireSession::require_identity(request)?.user_id;

    let submissions = service.storage.list_student_submissions(student_id).await?;
    Ok(HttpResponse::Ok().json(submissions))
}

/// 提交者本人或课程所有者可查看
pub async fn get_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
) -> ActixResult<HttpResponse> {
    let user_id = RequireSession::require_identity(request)?.user_id;

    let submission = service
        .storage
        .get_submission_by_id(submission_id)
        .await?
        .ok_or_else(|| PlatformError::not_found("Submission not found"))?;

    if submission.student_id != user_id {
        let task = load_task(&service.storage, submission.task_id).await?;
        load_owned_course(&service.storage, task.course_id, user_id)
            .await
            .map_err(|e| match e {
                PlatformError::Forbidden(_) => {
                    PlatformError::forbidden("You do not have access to this submission")
                }
                other => other,
            })?;
    }

    Ok(HttpResponse::Ok().json(submission))
}
