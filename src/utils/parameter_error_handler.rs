//! 请求参数解析失败时的统一错误响应

use actix_web::{
    HttpRequest,
    error::{Error, InternalError, JsonPayloadError, PathError, QueryPayloadError},
};

use crate::errors::PlatformError;

fn into_actix_error(err: PlatformError, cause: impl std::fmt::Display) -> Error {
    let response = actix_web::ResponseError::error_response(&err);
    InternalError::from_response(cause.to_string(), response).into()
}

/// JSON 请求体解析失败
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> Error {
    tracing::debug!("Invalid JSON body for {}: {}", req.path(), err);
    let message = match &err {
        JsonPayloadError::ContentType => "Content-Type must be application/json".to_string(),
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            "Request body is too large".to_string()
        }
        other => format!("Invalid JSON body: {other}"),
    };
    into_actix_error(PlatformError::validation(message), err)
}

/// 查询参数解析失败
pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> Error {
    tracing::debug!("Invalid query string for {}: {}", req.path(), err);
    let message = format!("Invalid query parameters: {err}");
    into_actix_error(PlatformError::validation(message), err)
}

/// 路径参数解析失败，按资源不存在处理
pub fn path_error_handler(err: PathError, req: &HttpRequest) -> Error {
    tracing::debug!("Invalid path parameter for {}: {}", req.path(), err);
    into_actix_error(PlatformError::not_found("Resource not found"), err)
}
