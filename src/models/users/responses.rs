use serde::Serialize;
use ts_rs::TS;

// 删除结果
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/user.ts")]
pub struct DeleteUserResponse {
    pub status: String,
    pub id: i64,
}
