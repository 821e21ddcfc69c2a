use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::middlewares::RequireSession;
use crate::models::users::entities::UserRole;

pub async fn list_courses(service: &CourseService) -> ActixResult<HttpResponse> {
    let courses = service.storage.list_courses().await?;
    Ok(HttpResponse::Ok().json(courses))
}

/// 学生返回已选课程，教授返回自己的课程
pub async fn list_my_courses(
    service: &CourseService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let identity = RequireSession::require_identity(request)?;

    let courses = match identity.role {
        UserRole::Student => service.storage.list_student_courses(identity.user_id).await?,
        _ => service
            .storage
            .list_courses()
            .await?
            .into_iter()
            .filter(|course| course.is_owned_by(identity.user_id))
            .collect(),
    };

    Ok(HttpResponse::Ok().json(courses))
}
