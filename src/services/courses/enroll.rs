use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{CourseService, load_course, load_owned_course};
use crate::errors::PlatformError;
use crate::middlewares::RequireSession;
use crate::models::enrollments::requests::EnrollStudentRequest;
use crate::models::users::entities::UserRole;

/// 学生自助选课，不发送通知
pub async fn enroll_self(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let student_id = RequireSession::require_identity(request)?.user_id;
    load_course(&service.storage, course_id).await?;

    let enrollment = service
        .storage
        .enroll_student(course_id, student_id, false)
        .await?;

    info!("Student {} enrolled in course {}", student_id, course_id);
    Ok(HttpResponse::Created().json(enrollment))
}

/// 课程所有者为学生选课，并通知该学生
pub async fn enroll_student(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
    data: EnrollStudentRequest,
) -> ActixResult<HttpResponse> {
    let user_id = RequireSession::require_identity(request)?.user_id;
    load_owned_course(&service.storage, course_id, user_id).await?;

    let student_id = data
        .student_id
        .ok_or_else(|| PlatformError::validation("Missing fields: studentId"))?;

    let student = service
        .storage
        .get_user_by_id(student_id)
        .await?
        .ok_or_else(|| PlatformError::not_found("Student not found"))?;
    if student.role != UserRole::Student {
        return Err(PlatformError::validation("User is not a student").into());
    }

    let enrollment = service
        .storage
        .enroll_student(course_id, student_id, true)
        .await?;
    service.notifier.wake();

    info!(
        "Professor {} enrolled student {} in course {}",
        user_id, student_id, course_id
    );
    Ok(HttpResponse::Created().json(enrollment))
}
