use actix_web::{HttpResponse, Result as ActixResult};
use tracing::info;

use super::CourseRequestService;
use crate::errors::PlatformError;
use crate::models::course_requests::requests::RejectCourseRequest;
use crate::models::course_requests::responses::ApproveCourseRequestResponse;
use crate::utils::validate::non_empty;

/// 批准申请：状态条件更新与课程创建在同一事务中完成
pub async fn approve_request(
    service: &CourseRequestService,
    request_id: i64,
) -> ActixResult<HttpResponse> {
    let (request, course) = service.storage.approve_course_request(request_id).await?;
    service.notifier.wake();

    info!(
        "Course request {} approved, course {} created for professor {}",
        request.id, course.id, course.professor_id
    );
    Ok(HttpResponse::Ok().json(ApproveCourseRequestResponse { request, course }))
}

pub async fn reject_request(
    service: &CourseRequestService,
    request_id: i64,
    data: RejectCourseRequest,
) -> ActixResult<HttpResponse> {
    let reason = non_empty(data.reason.as_ref())
        .ok_or_else(|| PlatformError::validation("Rejection reason is required"))?;

    let request = service
        .storage
        .reject_course_request(request_id, &reason)
        .await?;
    service.notifier.wake();

    info!("Course request {} rejected: {}", request.id, reason);
    Ok(HttpResponse::Ok().json(request))
}
