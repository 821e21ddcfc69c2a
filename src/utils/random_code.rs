use rand::Rng;

const PASSWORD_CHARSET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%";

/// 生成随机密码，保证包含大小写字母与数字
pub fn generate_random_password(length: usize) -> String {
    let length = length.max(8);
    let mut rng = rand::rng();
    let mut password: Vec<char> = (0..length - 3)
        .map(|_| PASSWORD_CHARSET[rng.random_range(0..PASSWORD_CHARSET.len())] as char)
        .collect();

    password.push(rng.random_range(b'A'..=b'Z') as char);
    password.push(rng.random_range(b'a'..=b'z') as char);
    password.push(rng.random_range(b'0'..=b'9') as char);
    password.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validate::validate_password;

    #[test]
    fn test_generated_password_satisfies_policy() {
        for _ in 0..20 {
            let password = generate_random_password(16);
            assert_eq!(password.len(), 16);
            assert!(validate_password(&password).is_valid);
        }
    }
}
