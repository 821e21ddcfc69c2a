pub mod create;
pub mod delete;
pub mod list;
pub mod profile;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::users::requests::{
    AdminCreateUserRequest, UpdateProfileImageRequest, UpdateProfileRequest, UserListParams,
};
use crate::state::AppState;
use crate::storage::Storage;

pub struct UserService {
    storage: Arc<dyn Storage>,
}

impl UserService {
    pub fn new(state: &AppState) -> Self {
        Self {
            storage: state.storage.clone(),
        }
    }

    // 获取当前用户资料
    pub async fn get_profile(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        profile::get_profile(self, request).await
    }

    // 更新当前用户资料
    pub async fn update_profile(
        &self,
        request: &HttpRequest,
        update: UpdateProfileRequest,
    ) -> ActixResult<HttpResponse> {
        profile::update_profile(self, request, update).await
    }

    // 设置或清除头像
    pub async fn update_profile_image(
        &self,
        request: &HttpRequest,
        update: UpdateProfileImageRequest,
    ) -> ActixResult<HttpResponse> {
        profile::update_profile_image(self, request, update).await
    }

    // 管理员创建用户
    pub async fn create_user(&self, user_data: AdminCreateUserRequest) -> ActixResult<HttpResponse> {
        create::create_user(self, user_data).await
    }

    // 获取用户列表
    pub async fn list_users(&self, query: UserListParams) -> ActixResult<HttpResponse> {
        list::list_users(self, query).await
    }

    // 删除用户
    pub async fn delete_user(
        &self,
        request: &HttpRequest,
        user_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_user(self, request, user_id).await
    }
}
