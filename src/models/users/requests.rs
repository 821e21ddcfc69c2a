use super::entities::UserRole;
use serde::Deserialize;
use ts_rs::TS;

// 用户注册请求（来自HTTP请求）
#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../client/src/types/generated/user.ts")]
pub struct RegisterRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub birth_date: Option<String>,
    pub gender: Option<String>,
    pub country: Option<String>,
    pub street: Option<String>,
    pub number: Option<String>,
    pub role: Option<String>,
}

// 管理员创建用户请求，所有字段均为必填
pub type AdminCreateUserRequest = RegisterRequest;

// 用户资料更新请求
#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../client/src/types/generated/user.ts")]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub birth_date: Option<String>,
    pub gender: Option<String>,
    pub country: Option<String>,
    pub street: Option<String>,
    pub number: Option<String>,
}

// 头像更新请求
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../client/src/types/generated/user.ts")]
pub struct UpdateProfileImageRequest {
    pub image_path: Option<String>,
}

// 管理员用户列表查询参数
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/user.ts")]
pub struct UserListParams {
    pub role: Option<UserRole>,
}

// 用户创建数据（用于存储层）
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub birth_date: String,
    pub gender: String,
    pub country: String,
    pub street: String,
    pub number: String,
}

// 用户更新数据（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub birth_date: Option<String>,
    pub gender: Option<String>,
    pub country: Option<String>,
    pub street: Option<String>,
    pub number: Option<String>,
    /// `Some(None)` 表示清除头像
    pub profile_image: Option<Option<String>>,
}
