use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{PlatformError, Result};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

pub const PASSWORD_MAX_LENGTH: usize = 128;

/// 规范化邮箱：去空白并转小写
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn validate_email(email: &str) -> std::result::Result<(), &'static str> {
    // 邮箱格式校验：必须包含 @ 和 .
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 密码策略验证结果
#[derive(Debug, Clone)]
pub struct PasswordValidationResult {
    pub is_valid: bool,
    pub errors: Vec<&'static str>,
}

impl PasswordValidationResult {
    pub fn error_message(&self) -> String {
        self.errors.join("; ")
    }
}

/// 验证密码是否符合安全策略
///
/// 策略要求：
/// - 长度：8 到 128 字符
/// - 必须包含：大写字母 + 小写字母 + 数字
pub fn validate_password(password: &str) -> PasswordValidationResult {
    let mut errors = Vec::new();

    // 1. 长度检查
    if password.len() < 8 {
        errors.push("Password must be at least 8 characters long");
    }
    if password.len() > PASSWORD_MAX_LENGTH {
        errors.push("Password must be at most 128 characters long");
    }

    // 2. 大写字母检查
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain at least one uppercase letter");
    }

    // 3. 小写字母检查
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain at least one lowercase letter");
    }

    // 4. 数字检查
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one digit");
    }

    PasswordValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// 简化的密码验证（返回 Result）
pub fn validate_password_simple(password: &str) -> std::result::Result<(), String> {
    let result = validate_password(password);
    if result.is_valid {
        Ok(())
    } else {
        Err(result.error_message())
    }
}

/// 取出去空白后的非空字符串
pub fn non_empty(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// 检查必填字段，缺失的字段名一次性列出
pub fn require_fields(fields: &[(&str, Option<&String>)]) -> Result<()> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| non_empty(*value).is_none())
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(PlatformError::validation(format!(
            "Missing fields: {}",
            missing.join(", ")
        )))
    }
}

/// 检查 data URL 前缀
pub fn validate_data_url(value: &str, prefix: &str, message: &str) -> Result<()> {
    if value.starts_with(prefix) {
        Ok(())
    } else {
        Err(PlatformError::validation(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_password() {
        assert!(validate_password("SecureP@ss1").is_valid);
        assert!(validate_password("SecurePass123").is_valid);
    }

    #[test]
    fn test_short_password() {
        let result = validate_password("Ab1");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must be at least 8 characters long")
        );
    }

    #[test]
    fn test_long_password() {
        let password = format!("Aa1{}", "x".repeat(PASSWORD_MAX_LENGTH));
        let result = validate_password(&password);
        assert!(!result.is_valid);
    }

    #[test]
    fn test_no_uppercase() {
        let result = validate_password("abcd1234");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must contain at least one uppercase letter")
        );
    }

    #[test]
    fn test_no_digit() {
        let result = validate_password("AbcdEfgh");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must contain at least one digit")
        );
    }

    #[test]
    fn test_email() {
        assert!(validate_email("ana@example.com").is_ok());
        assert!(validate_email("ana.example.com").is_err());
        assert_eq!(normalize_email("  Ana@Example.COM "), "ana@example.com");
    }

    #[test]
    fn test_require_fields_lists_missing() {
        let name = "Algorithms".to_string();
        let blank = "   ".to_string();
        let err = require_fields(&[
            ("name", Some(&name)),
            ("description", Some(&blank)),
            ("deadline", None),
        ])
        .unwrap_err();
        assert_eq!(err.message(), "Missing fields: description, deadline");
    }

    #[test]
    fn test_validate_data_url() {
        assert!(validate_data_url("data:application/pdf;base64,AAA", "data:application/pdf", "bad").is_ok());
        let err = validate_data_url("http://x", "data:", "Invalid file format").unwrap_err();
        assert_eq!(err.message(), "Invalid file format");
    }
}
