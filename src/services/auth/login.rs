use actix_web::{HttpResponse, Result as ActixResult};
use tracing::info;

use crate::errors::PlatformError;
use crate::models::auth::{requests::LoginRequest, responses::LoginResponse};
use crate::session::SessionIdentity;
use crate::utils::password::verify_password;
use crate::utils::validate::{normalize_email, require_fields};

use super::AuthService;

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
) -> ActixResult<HttpResponse> {
    require_fields(&[
        ("email", login_request.email.as_ref()),
        ("password", login_request.password.as_ref()),
    ])?;

    let email = normalize_email(login_request.email.as_deref().unwrap_or_default());
    let password = login_request.password.as_deref().unwrap_or_default();

    // 1. 根据邮箱获取用户，2. 验证密码
    let user = match service.storage.get_user_by_email(&email).await? {
        Some(user) if verify_password(password, &user.password_hash) => user,
        _ => {
            info!("Failed login attempt for {}", email);
            return Err(PlatformError::unauthenticated("Invalid credentials").into());
        }
    };

    // 3. 创建会话
    let session_id = service
        .sessions
        .create(&SessionIdentity {
            user_id: user.id,
            email: user.email.clone(),
            role: user.role,
        })
        .await?;

    info!("User {} logged in successfully", user.email);
    Ok(HttpResponse::Ok().json(LoginResponse { session_id, user }))
}
