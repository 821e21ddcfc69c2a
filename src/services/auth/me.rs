use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireSession;
use crate::models::auth::responses::MeResponse;

pub async fn handle_me(request: &HttpRequest) -> ActixResult<HttpResponse> {
    let identity = RequireSession::require_identity(request)?;

    Ok(HttpResponse::Ok().json(MeResponse {
        id: identity.user_id,
        email: identity.email,
        role: identity.role,
    }))
}
