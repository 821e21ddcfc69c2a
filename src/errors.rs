//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，每个变体携带错误代码、类型名称与 HTTP 状态码，
//! 并通过 `ResponseError` 在请求边界转换为统一的 JSON 错误体。

use std::fmt;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - http_status() 方法 - 返回对应的 HTTP 状态码
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_platform_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal, $status:ident)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum PlatformError {
            $($variant(String),)*
        }

        impl PlatformError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(PlatformError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(PlatformError::$variant(_) => $type_name,)*
                }
            }

            /// 获取 HTTP 状态码
            pub fn http_status(&self) -> StatusCode {
                match self {
                    $(PlatformError::$variant(_) => StatusCode::$status,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(PlatformError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl PlatformError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        PlatformError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_platform_errors! {
    CacheConnection("E001", "Cache Connection Error", INTERNAL_SERVER_ERROR),
    DatabaseConfig("E002", "Database Configuration Error", INTERNAL_SERVER_ERROR),
    DatabaseConnection("E003", "Database Connection Error", INTERNAL_SERVER_ERROR),
    DatabaseOperation("E004", "Database Operation Error", INTERNAL_SERVER_ERROR),
    Serialization("E005", "Serialization Error", INTERNAL_SERVER_ERROR),
    DateParse("E006", "Date Parse Error", BAD_REQUEST),
    Validation("E007", "Validation Error", BAD_REQUEST),
    Unauthenticated("E008", "Unauthenticated", UNAUTHORIZED),
    Forbidden("E009", "Forbidden", FORBIDDEN),
    NotFound("E010", "Resource Not Found", NOT_FOUND),
    Conflict("E011", "Conflict", CONFLICT),
    Internal("E012", "Internal Error", INTERNAL_SERVER_ERROR),
    Notification("E013", "Notification Delivery Error", INTERNAL_SERVER_ERROR),
}

/// 返回给客户端的错误体
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl PlatformError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 构造错误体
    ///
    /// 服务端错误与日期解析错误以类型名作为 `error`，原始信息放入 `detail`；
    /// 其余业务错误直接以信息作为 `error`。
    pub fn to_body(&self) -> ErrorBody {
        let with_detail =
            self.http_status().is_server_error() || matches!(self, PlatformError::DateParse(_));

        if with_detail {
            ErrorBody {
                error: self.error_type().to_string(),
                code: self.code(),
                detail: Some(self.message().to_string()),
            }
        } else {
            ErrorBody {
                error: self.message().to_string(),
                code: self.code(),
                detail: None,
            }
        }
    }
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for PlatformError {}

impl ResponseError for PlatformError {
    fn status_code(&self) -> StatusCode {
        self.http_status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.http_status();
        if status.is_server_error() {
            tracing::error!("{} {}", self.code(), self.format_simple());
        }
        HttpResponse::build(status).json(self.to_body())
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for PlatformError {
    fn from(err: sea_orm::DbErr) -> Self {
        PlatformError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for PlatformError {
    fn from(err: std::io::Error) -> Self {
        PlatformError::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for PlatformError {
    fn from(err: serde_json::Error) -> Self {
        PlatformError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for PlatformError {
    fn from(err: chrono::ParseError) -> Self {
        PlatformError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PlatformError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(PlatformError::cache_connection("test").code(), "E001");
        assert_eq!(PlatformError::validation("test").code(), "E007");
        assert_eq!(PlatformError::conflict("test").code(), "E011");
    }

    #[test]
    fn test_error_status() {
        assert_eq!(
            PlatformError::validation("x").http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            PlatformError::unauthenticated("x").http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            PlatformError::forbidden("x").http_status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            PlatformError::not_found("x").http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            PlatformError::conflict("x").http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            PlatformError::database_operation("x").http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_business_error_body_has_no_detail() {
        let body = PlatformError::conflict("Course request already processed").to_body();
        assert_eq!(body.error, "Course request already processed");
        assert!(body.detail.is_none());

        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("detail").is_none());
        assert_eq!(json["code"], "E011");
    }

    #[test]
    fn test_internal_error_body_carries_detail() {
        let body = PlatformError::database_operation("connection reset").to_body();
        assert_eq!(body.error, "Database Operation Error");
        assert_eq!(body.detail.as_deref(), Some("connection reset"));
    }

    #[test]
    fn test_date_parse_body_carries_detail() {
        let err: PlatformError = chrono::DateTime::parse_from_rfc3339("not-a-date")
            .unwrap_err()
            .into();
        let body = err.to_body();
        assert_eq!(body.error, "Date Parse Error");
        assert!(body.detail.is_some());
    }

    #[test]
    fn test_format_simple() {
        let err = PlatformError::validation("Invalid URL");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("Invalid URL"));
    }
}
