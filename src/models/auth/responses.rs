use crate::models::users::entities::{User, UserRole};
use serde::Serialize;
use ts_rs::TS;

// 登录/注册成功响应
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../client/src/types/generated/auth.ts")]
pub struct LoginResponse {
    pub session_id: String,
    pub user: User,
}

// 当前会话身份
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/auth.ts")]
pub struct MeResponse {
    pub id: i64,
    pub email: String,
    pub role: UserRole,
}
