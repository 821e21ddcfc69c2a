pub mod require_role;
pub mod require_session;

pub use require_role::RequireRole;
pub use require_session::RequireSession;

use actix_web::{HttpResponse, ResponseError};

use crate::errors::PlatformError;

// 辅助函数：中间件中直接构造错误响应
pub(crate) fn create_error_response(err: &PlatformError) -> HttpResponse {
    err.error_response()
}
