use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{CourseService, load_owned_course};
use crate::errors::PlatformError;
use crate::middlewares::RequireSession;
use crate::models::courses::requests::UploadMaterialRequest;
use crate::utils::validate::{non_empty, validate_data_url};

const PDF_PREFIX: &str = "data:application/pdf";
const DEFAULT_MATERIAL_NAME: &str = "material.pdf";

pub async fn upload_material(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
    data: UploadMaterialRequest,
) -> ActixResult<HttpResponse> {
    let user_id = RequireSession::require_identity(request)?.user_id;
    load_owned_course(&service.storage, course_id, user_id).await?;

    let material_path = non_empty(data.material_path.as_ref())
        .ok_or_else(|| PlatformError::validation("Missing fields: materialPath"))?;
    validate_data_url(&material_path, PDF_PREFIX, "Material must be a PDF file")?;

    let file_name =
        non_empty(data.file_name.as_ref()).unwrap_or_else(|| DEFAULT_MATERIAL_NAME.to_string());

    let course = service
        .storage
        .set_course_material(course_id, &material_path, &file_name)
        .await?
        .ok_or_else(|| PlatformError::not_found("Course not found"))?;
    service.notifier.wake();

    info!("Material {} uploaded to course {}", file_name, course_id);
    Ok(HttpResponse::Ok().json(course))
}
