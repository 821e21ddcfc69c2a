use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::errors::PlatformError;
use crate::middlewares::RequireSession;
use crate::models::submissions::responses::SubmissionDownloadResponse;
use crate::services::courses::load_owned_course;
use crate::services::tasks::load_task;

/// 下载文件名：`{名}_{姓}_{任务标题}.py`
pub(crate) fn download_file_name(first_name: &str, last_name: &str, task_title: &str) -> String {
    format!("{first_name}_{last_name}_{task_title}.py")
}

pub async fn download_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    task_id: i64,
    submission_id: i64,
) -> ActixResult<HttpResponse> {
    let user_id = RequireSession::require_identity(request)?.user_id;

    let task = load_task(&service.storage, task_id).await?;
    load_owned_course(&service.storage, task.course_id, user_id).await?;

    let submission = service
        .storage
        .get_submission_by_id(submission_id)
        .await?
        .filter(|s| s.task_id == task_id)
        .ok_or_else(|| PlatformError::not_found("Submission not found"))?;

    let student = service
        .storage
        .get_user_by_id(submission.student_id)
        .await?
        .ok_or_else(|| PlatformError::not_found("Student not found"))?;

    Ok(HttpResponse::Ok().json(SubmissionDownloadResponse {
        file_data: submission.file_path,
        file_name: download_file_name(&student.first_name, &student.last_name, &task.title),
        student_name: submission.student_name,
        task_title: task.title,
        submitted_at: submission.submitted_at,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_file_name() {
        assert_eq!(
            download_file_name("Ada", "Lovelace", "Heaps"),
            "Ada_Lovelace_Heaps.py"
        );
    }
}
