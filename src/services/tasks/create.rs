use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::TaskService;
use crate::errors::PlatformError;
use crate::middlewares::RequireSession;
use crate::models::tasks::entities::parse_deadline;
use crate::models::tasks::requests::{CreateTaskRequest, NewTask};
use crate::services::courses::load_owned_course;
use crate::utils::validate::{non_empty, require_fields};

pub async fn create_task(
    service: &TaskService,
    request: &HttpRequest,
    data: CreateTaskRequest,
) -> ActixResult<HttpResponse> {
    let user_id = RequireSession::require_identity(request)?.user_id;

    // 1. 必填字段
    let course_id_text = data.course_id.map(|id| id.to_string());
    require_fields(&[
        ("courseId", course_id_text.as_ref()),
        ("title", data.title.as_ref()),
        ("description", data.description.as_ref()),
        ("deadline", data.deadline.as_ref()),
    ])?;
    let course_id = data
        .course_id
        .ok_or_else(|| PlatformError::validation("Missing fields: courseId"))?;

    // 2. 截止时间
    let deadline = parse_deadline(data.deadline.as_deref().unwrap_or_default())?;

    // 3. 仅课程所有者可以布置任务
    load_owned_course(&service.storage, course_id, user_id).await?;

    let task = service
        .storage
        .create_task(NewTask {
            course_id,
            title: non_empty(data.title.as_ref()).unwrap_or_default(),
            description: non_empty(data.description.as_ref()).unwrap_or_default(),
            deadline,
        })
        .await?;
    service.notifier.wake();

    info!("Task {} created in course {}", task.id, course_id);
    Ok(HttpResponse::Created().json(task))
}
