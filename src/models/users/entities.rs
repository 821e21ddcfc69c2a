use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 用户角色
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "UPPERCASE")]
#[ts(export, export_to = "../client/src/types/generated/user.ts")]
pub enum UserRole {
    Student,  // 学生
    Profesor, // 教授
    Admin,    // 管理员
}

impl UserRole {
    pub const STUDENT: &'static str = "STUDENT";
    pub const PROFESOR: &'static str = "PROFESOR";
    pub const ADMIN: &'static str = "ADMIN";

    pub fn admin_roles() -> &'static [&'static UserRole] {
        &[&Self::Admin]
    }
    pub fn professor_roles() -> &'static [&'static UserRole] {
        &[&Self::Profesor]
    }
    pub fn student_roles() -> &'static [&'static UserRole] {
        &[&Self::Student]
    }
    /// 可以自助注册或由管理员创建的角色
    pub fn registrable_roles() -> &'static [&'static UserRole] {
        &[&Self::Student, &Self::Profesor]
    }

    /// 实时通道中的角色房间
    pub fn room(&self) -> &'static str {
        match self {
            UserRole::Student => "students",
            UserRole::Profesor => "professors",
            UserRole::Admin => "admins",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Student => write!(f, "{}", UserRole::STUDENT),
            UserRole::Profesor => write!(f, "{}", UserRole::PROFESOR),
            UserRole::Admin => write!(f, "{}", UserRole::ADMIN),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            UserRole::STUDENT => Ok(UserRole::Student),
            UserRole::PROFESOR => Ok(UserRole::Profesor),
            UserRole::ADMIN => Ok(UserRole::Admin),
            _ => Err(format!("Invalid user role: {s}")),
        }
    }
}

// 用户实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../client/src/types/generated/user.ts")]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub password_hash: String,
    pub role: UserRole,
    pub birth_date: String,
    pub gender: String,
    pub country: String,
    pub street: String,
    pub number: String,
    pub profile_image: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_role_wire_format() {
        assert_eq!(
            serde_json::to_string(&UserRole::Profesor).unwrap(),
            "\"PROFESOR\""
        );
        let role: UserRole = serde_json::from_str("\"STUDENT\"").unwrap();
        assert_eq!(role, UserRole::Student);
    }

    #[test]
    fn test_role_from_str_is_case_insensitive() {
        assert_eq!(UserRole::from_str("profesor").unwrap(), UserRole::Profesor);
        assert_eq!(UserRole::from_str(" Admin ").unwrap(), UserRole::Admin);
        assert!(UserRole::from_str("teacher").is_err());
    }

    #[test]
    fn test_password_hash_is_not_serialized() {
        let user = User {
            id: 1,
            first_name: "Ana".to_string(),
            last_name: "Petrovic".to_string(),
            email: "ana@example.com".to_string(),
            password_hash: "secret".to_string(),
            role: UserRole::Student,
            birth_date: String::new(),
            gender: String::new(),
            country: String::new(),
            street: String::new(),
            number: String::new(),
            profile_image: None,
            created_at: chrono::Utc::now(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["firstName"], "Ana");
    }
}
