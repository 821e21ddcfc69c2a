use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseRequestService;
use crate::middlewares::RequireSession;
use crate::models::course_requests::requests::CourseRequestListParams;

pub async fn list_my_requests(
    service: &CourseRequestService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let professor_id = RequireSession::require_identity(request)?.user_id;

    let requests = service
        .storage
        .list_course_requests(Some(professor_id), None)
        .await?;
    Ok(HttpResponse::Ok().json(requests))
}

pub async fn list_requests(
    service: &CourseRequestService,
    query: CourseRequestListParams,
) -> ActixResult<HttpResponse> {
    let requests = service
        .storage
        .list_course_requests(None, query.status)
        .await?;
    Ok(HttpResponse::Ok().json(requests))
}
