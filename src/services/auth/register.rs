use actix_web::{HttpResponse, Result as ActixResult};
use tracing::info;

use crate::errors::{PlatformError, Result};
use crate::models::auth::responses::LoginResponse;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::{CreateUserRequest, RegisterRequest};
use crate::session::SessionIdentity;
use crate::utils::password::hash_password;
use crate::utils::validate::{
    non_empty, normalize_email, require_fields, validate_email, validate_password_simple,
};

use super::AuthService;

/// 解析可注册的角色，缺省为学生
pub(crate) fn parse_registrable_role(raw: Option<&String>) -> Result<UserRole> {
    let Some(raw) = non_empty(raw) else {
        return Ok(UserRole::Student);
    };

    let role: UserRole = raw
        .parse()
        .map_err(|_| PlatformError::validation("Invalid role"))?;

    if UserRole::registrable_roles().iter().any(|r| **r == role) {
        Ok(role)
    } else {
        Err(PlatformError::validation("Invalid role"))
    }
}

/// 校验注册数据并转换为存储层请求
pub(crate) fn build_create_user(
    request: &RegisterRequest,
    role: UserRole,
) -> Result<CreateUserRequest> {
    let email = normalize_email(request.email.as_deref().unwrap_or_default());
    validate_email(&email).map_err(PlatformError::validation)?;

    let password = request.password.as_deref().unwrap_or_default();
    validate_password_simple(password).map_err(PlatformError::validation)?;

    let text = |value: &Option<String>| non_empty(value.as_ref()).unwrap_or_default();

    Ok(CreateUserRequest {
        first_name: text(&request.first_name),
        last_name: text(&request.last_name),
        email,
        password_hash: hash_password(password)?,
        role,
        birth_date: text(&request.birth_date),
        gender: text(&request.gender),
        country: text(&request.country),
        street: text(&request.street),
        number: text(&request.number),
    })
}

pub async fn handle_register(
    service: &AuthService,
    register_request: RegisterRequest,
) -> ActixResult<HttpResponse> {
    // 1. 必填字段
    require_fields(&[
        ("firstName", register_request.first_name.as_ref()),
        ("lastName", register_request.last_name.as_ref()),
        ("email", register_request.email.as_ref()),
        ("password", register_request.password.as_ref()),
    ])?;

    // 2. 角色与格式校验
    let role = parse_registrable_role(register_request.role.as_ref())?;
    let create_request = build_create_user(&register_request, role)?;

    // 3. 创建用户，邮箱重复时为 Conflict
    let user = service.storage.create_user(create_request).await?;

    // 4. 建立会话
    let session_id = service
        .sessions
        .create(&SessionIdentity {
            user_id: user.id,
            email: user.email.clone(),
            role: user.role,
        })
        .await?;

    info!("User {} registered as {}", user.email, user.role);
    Ok(HttpResponse::Created().json(LoginResponse { session_id, user }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_defaults_to_student() {
        assert_eq!(parse_registrable_role(None).unwrap(), UserRole::Student);
        assert_eq!(
            parse_registrable_role(Some(&"  ".to_string())).unwrap(),
            UserRole::Student
        );
    }

    #[test]
    fn test_admin_role_is_not_registrable() {
        assert!(parse_registrable_role(Some(&"ADMIN".to_string())).is_err());
        assert!(parse_registrable_role(Some(&"teacher".to_string())).is_err());
        assert_eq!(
            parse_registrable_role(Some(&"profesor".to_string())).unwrap(),
            UserRole::Profesor
        );
    }

    #[test]
    fn test_build_create_user_normalizes_email() {
        let request = RegisterRequest {
            first_name: Some("Ada".to_string()),
            last_name: Some("Lovelace".to_string()),
            email: Some(" Ada@Example.COM ".to_string()),
            password: Some("Secret123".to_string()),
            ..Default::default()
        };
        let user = build_create_user(&request, UserRole::Student).unwrap();
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.country, "");
        assert_ne!(user.password_hash, "Secret123");
    }

    #[test]
    fn test_build_create_user_rejects_weak_password() {
        let request = RegisterRequest {
            email: Some("ada@example.com".to_string()),
            password: Some("short".to_string()),
            ..Default::default()
        };
        let err = build_create_user(&request, UserRole::Student).unwrap_err();
        assert_eq!(err.code(), "E007");
    }
}
