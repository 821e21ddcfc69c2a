use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{CourseService, load_owned_course};
use crate::errors::PlatformError;
use crate::middlewares::RequireSession;
use crate::models::MessageResponse;
use crate::models::courses::requests::UpdateCourseRequest;
use crate::utils::validate::non_empty;

pub async fn update_course(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
    update_data: UpdateCourseRequest,
) -> ActixResult<HttpResponse> {
    let user_id = RequireSession::require_identity(request)?.user_id;
    load_owned_course(&service.storage, course_id, user_id).await?;

    let changes = UpdateCourseRequest {
        name: non_empty(update_data.name.as_ref()),
        description: non_empty(update_data.description.as_ref()),
    };
    if changes.name.is_none() && changes.description.is_none() {
        return Err(PlatformError::validation("No fields to update").into());
    }

    match service.storage.update_course(course_id, changes).await? {
        Some(course) => {
            info!("Course {} updated by professor {}", course_id, user_id);
            Ok(HttpResponse::Ok().json(course))
        }
        None => Err(PlatformError::not_found("Course not found").into()),
    }
}

/// 删除课程及其选课、任务和提交
pub async fn delete_course(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let user_id = RequireSession::require_identity(request)?.user_id;
    load_owned_course(&service.storage, course_id, user_id).await?;

    if !service.storage.delete_course(course_id).await? {
        return Err(PlatformError::not_found("Course not found").into());
    }

    info!("Course {} deleted by professor {}", course_id, user_id);
    Ok(HttpResponse::Ok().json(MessageResponse::new("Course deleted successfully")))
}
