use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::UserService;
use crate::errors::PlatformError;
use crate::middlewares::RequireSession;
use crate::models::users::responses::DeleteUserResponse;

pub async fn delete_user(
    service: &UserService,
    request: &HttpRequest,
    user_id: i64,
) -> ActixResult<HttpResponse> {
    // 禁止删除当前登录的管理员
    if RequireSession::extract_user_id(request) == Some(user_id) {
        return Err(PlatformError::validation("You cannot delete your own account").into());
    }

    if !service.storage.delete_user(user_id).await? {
        return Err(PlatformError::not_found("User not found").into());
    }

    info!("User {} deleted", user_id);
    Ok(HttpResponse::Ok().json(DeleteUserResponse {
        status: "deleted".to_string(),
        id: user_id,
    }))
}
