use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{CourseService, load_owned_course};
use crate::middlewares::RequireSession;
use crate::models::users::entities::UserRole;

pub async fn list_students(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let user_id = RequireSession::require_identity(request)?.user_id;
    load_owned_course(&service.storage, course_id, user_id).await?;

    let student_ids: Vec<i64> = service
        .storage
        .list_course_enrollments(course_id)
        .await?
        .into_iter()
        .map(|enrollment| enrollment.student_id)
        .collect();
    let students = service.storage.get_users_by_ids(&student_ids).await?;

    Ok(HttpResponse::Ok().json(students))
}

pub async fn list_available_students(service: &CourseService) -> ActixResult<HttpResponse> {
    let students = service.storage.list_users(Some(UserRole::Student)).await?;
    Ok(HttpResponse::Ok().json(students))
}

pub async fn list_course_submissions(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let user_id = RequireSession::require_identity(request)?.user_id;
    load_owned_course(&service.storage, course_id, user_id).await?;

    let submissions = service.storage.list_course_submissions(course_id).await?;
    Ok(HttpResponse::Ok().json(submissions))
}
