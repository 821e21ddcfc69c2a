use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SubmissionService;
use crate::errors::{PlatformError, Result};
use crate::middlewares::RequireSession;
use crate::models::submissions::requests::SubmitTaskRequest;
use crate::models::submissions::responses::SubmitTaskResponse;
use crate::services::tasks::load_task;
use crate::utils::validate::{non_empty, validate_data_url};

const DEFAULT_FILE_NAME: &str = "solution.py";

/// 校验提交文件，返回 (文件内容, 文件名)
fn validate_submission_file(data: &SubmitTaskRequest) -> Result<(String, String)> {
    let file_path = non_empty(data.file_path.as_ref())
        .ok_or_else(|| PlatformError::validation("Missing fields: filePath"))?;
    validate_data_url(&file_path, "data:", "File must be a data URL")?;

    let file_name =
        non_empty(data.file_name.as_ref()).unwrap_or_else(|| DEFAULT_FILE_NAME.to_string());
    if !file_name.to_lowercase().ends_with(".py") {
        return Err(PlatformError::validation("Only .py files are accepted"));
    }

    Ok((file_path, file_name))
}

pub async fn submit_task(
    service: &SubmissionService,
    request: &HttpRequest,
    task_id: i64,
    data: SubmitTaskRequest,
) -> ActixResult<HttpResponse> {
    let student_id = RequireSession::require_identity(request)?.user_id;

    let task = load_task(&service.storage, task_id).await?;
    if service
        .storage
        .get_enrollment(task.course_id, student_id)
        .await?
        .is_none()
    {
        return Err(PlatformError::forbidden("You are not enrolled in this course").into());
    }

    let (file_path, file_name) = validate_submission_file(&data)?;

    let outcome = service
        .storage
        .submit_task(task_id, student_id, &file_path, &file_name)
        .await?;
    service.notifier.wake();

    if outcome.resubmitted {
        info!("Student {} resubmitted task {}", student_id, task_id);
        Ok(HttpResponse::Ok().json(SubmitTaskResponse {
            submission: outcome.submission,
            message: "Submission updated".to_string(),
        }))
    } else {
        info!("Student {} submitted task {}", student_id, task_id);
        Ok(HttpResponse::Created().json(SubmitTaskResponse {
            submission: outcome.submission,
            message: "Submission created".to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(path: Option<&str>, name: Option<&str>) -> SubmitTaskRequest {
        SubmitTaskRequest {
            file_path: path.map(str::to_string),
            file_name: name.map(str::to_string),
        }
    }

    #[test]
    fn test_default_file_name() {
        let data = request(Some("data:text/x-python;base64,AA=="), None);
        let (_, name) = validate_submission_file(&data).unwrap();
        assert_eq!(name, "solution.py");
    }

    #[test]
    fn test_rejects_non_python_files() {
        let err =
            validate_submission_file(&request(Some("data:,x"), Some("report.pdf"))).unwrap_err();
        assert_eq!(err.message(), "Only .py files are accepted");
    }

    #[test]
    fn test_rejects_plain_paths() {
        assert!(validate_submission_file(&request(Some("/tmp/sol.py"), Some("sol.py"))).is_err());
        assert!(validate_submission_file(&request(None, Some("sol.py"))).is_err());
    }
}
