use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use crate::middlewares::RequireSession;
use crate::models::MessageResponse;

use super::AuthService;

/// 处理用户登出
/// 删除缓存中的会话，令牌随即失效
pub async fn handle_logout(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(token) = RequireSession::extract_token(request) {
        service.sessions.revoke(&token).await;
    }

    if let Some(user_id) = RequireSession::extract_user_id(request) {
        info!("User {} logged out", user_id);
    }

    Ok(HttpResponse::Ok().json(MessageResponse::new("Logged out successfully")))
}
