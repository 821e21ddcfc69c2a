pub mod login;
pub mod logout;
pub mod me;
pub mod register;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::auth::requests::LoginRequest;
use crate::models::users::requests::RegisterRequest;
use crate::session::SessionStore;
use crate::state::AppState;
use crate::storage::Storage;

pub struct AuthService {
    storage: Arc<dyn Storage>,
    sessions: SessionStore,
}

impl AuthService {
    pub fn new(state: &AppState) -> Self {
        Self {
            storage: state.storage.clone(),
            sessions: state.sessions.clone(),
        }
    }

    // 用户注册，成功后直接登录
    pub async fn register(&self, register_request: RegisterRequest) -> ActixResult<HttpResponse> {
        register::handle_register(self, register_request).await
    }

    // 登录验证
    pub async fn login(&self, login_request: LoginRequest) -> ActixResult<HttpResponse> {
        login::handle_login(self, login_request).await
    }

    // 注销当前会话
    pub async fn logout(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        logout::handle_logout(self, request).await
    }

    // 当前会话身份
    pub async fn me(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        me::handle_me(request).await
    }
}
