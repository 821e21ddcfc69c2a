use actix_web::{HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::users::requests::UserListParams;

pub async fn list_users(service: &UserService, query: UserListParams) -> ActixResult<HttpResponse> {
    let users = service.storage.list_users(query.role).await?;
    Ok(HttpResponse::Ok().json(users))
}
