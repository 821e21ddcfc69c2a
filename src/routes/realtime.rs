use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use serde::Deserialize;
use tracing::info;

use crate::errors::PlatformError;
use crate::models::users::entities::UserRole;
use crate::services::realtime::connection::handle_connection;
use crate::session::SessionIdentity;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RealtimeConnectParams {
    pub session_id: Option<String>,
    pub user_id: Option<i64>,
    pub role: Option<String>,
}

/// 校验连接参数中声明的身份与会话一致
fn check_claimed_identity(
    params: &RealtimeConnectParams,
    identity: &SessionIdentity,
) -> Result<(), PlatformError> {
    if let Some(user_id) = params.user_id
        && user_id != identity.user_id
    {
        return Err(PlatformError::forbidden("user_id does not match session"));
    }

    if let Some(role) = params.role.as_deref() {
        match role.parse::<UserRole>() {
            Ok(role) if role == identity.role => {}
            _ => return Err(PlatformError::forbidden("role does not match session")),
        }
    }

    Ok(())
}

pub async fn connect(
    req: HttpRequest,
    stream: web::Payload,
    state: web::Data<AppState>,
    query: web::Query<RealtimeConnectParams>,
) -> ActixResult<HttpResponse> {
    let params = query.into_inner();

    let token = params
        .session_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| PlatformError::unauthenticated("Missing session ID"))?;

    let identity = state
        .sessions
        .resolve(token)
        .await
        .ok_or_else(|| PlatformError::unauthenticated("Invalid or expired session"))?;

    check_claimed_identity(&params, &identity)?;

    let (response, session, msg_stream) = actix_ws::handle(&req, stream)?;
    info!("Realtime connection accepted for user {}", identity.user_id);

    actix_web::rt::spawn(handle_connection(
        state.hub.clone(),
        identity,
        session,
        msg_stream,
    ));

    Ok(response)
}

// 配置路由
pub fn configure_realtime_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/ws", web::get().to(connect));
}
