use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::CourseRequestService;
use crate::middlewares::RequireSession;
use crate::models::course_requests::requests::SubmitCourseRequest;
use crate::utils::validate::{non_empty, require_fields};

pub async fn submit_request(
    service: &CourseRequestService,
    request: &HttpRequest,
    data: SubmitCourseRequest,
) -> ActixResult<HttpResponse> {
    let professor_id = RequireSession::require_identity(request)?.user_id;

    require_fields(&[
        ("name", data.name.as_ref()),
        ("description", data.description.as_ref()),
    ])?;
    let name = non_empty(data.name.as_ref()).unwrap_or_default();
    let description = non_empty(data.description.as_ref()).unwrap_or_default();

    let created = service
        .storage
        .create_course_request(professor_id, &name, &description)
        .await?;
    service.notifier.wake();

    info!(
        "Course request {} ({}) submitted by professor {}",
        created.id, created.name, professor_id
    );
    Ok(HttpResponse::Created().json(created))
}
