use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{TaskService, ensure_course_access};
use crate::middlewares::RequireSession;

pub async fn list_course_tasks(
    service: &TaskService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let identity = RequireSession::require_identity(request)?;
    ensure_course_access(&service.storage, course_id, &identity).await?;

    let tasks = service.storage.list_course_tasks(course_id).await?;
    Ok(HttpResponse::Ok().json(tasks))
}
