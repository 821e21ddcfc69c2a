use actix_web::{HttpResponse, Result as ActixResult};
use tracing::info;

use super::UserService;
use crate::errors::PlatformError;
use crate::models::users::requests::AdminCreateUserRequest;
use crate::services::auth::register::{build_create_user, parse_registrable_role};
use crate::utils::validate::require_fields;

pub async fn create_user(
    service: &UserService,
    user_data: AdminCreateUserRequest,
) -> ActixResult<HttpResponse> {
    // 管理员创建用户时所有字段均为必填
    require_fields(&[
        ("firstName", user_data.first_name.as_ref()),
        ("lastName", user_data.last_name.as_ref()),
        ("email", user_data.email.as_ref()),
        ("password", user_data.password.as_ref()),
        ("birthDate", user_data.birth_date.as_ref()),
        ("gender", user_data.gender.as_ref()),
        ("country", user_data.country.as_ref()),
        ("street", user_data.street.as_ref()),
        ("number", user_data.number.as_ref()),
        ("role", user_data.role.as_ref()),
    ])?;

    let role = parse_registrable_role(user_data.role.as_ref())
        .map_err(|_| PlatformError::validation("Role must be STUDENT or PROFESOR"))?;

    let create_request = build_create_user(&user_data, role)?;
    let user = service.storage.create_user(create_request).await?;

    info!("Admin created user {} ({})", user.email, user.role);
    Ok(HttpResponse::Created().json(user))
}
