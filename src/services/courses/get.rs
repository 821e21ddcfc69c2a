use actix_web::{HttpResponse, Result as ActixResult};

use super::{CourseService, load_course};

pub async fn get_course(service: &CourseService, course_id: i64) -> ActixResult<HttpResponse> {
    let course = load_course(&service.storage, course_id).await?;
    Ok(HttpResponse::Ok().json(course))
}
