use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::UserService;
use crate::errors::{PlatformError, Result};
use crate::middlewares::RequireSession;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::{
    UpdateProfileImageRequest, UpdateProfileRequest, UpdateUserRequest,
};
use crate::utils::validate::{non_empty, normalize_email, validate_data_url, validate_email};

const IMAGE_PREFIX: &str = "data:image/";

pub async fn get_profile(service: &UserService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let user_id = RequireSession::require_identity(request)?.user_id;

    match service.storage.get_user_by_id(user_id).await? {
        Some(user) => Ok(HttpResponse::Ok().json(user)),
        None => Err(PlatformError::not_found("User not found").into()),
    }
}

/// 将资料更新请求转换为存储层更新，空字符串视为未提供
fn build_profile_update(update: &UpdateProfileRequest) -> Result<UpdateUserRequest> {
    let email = match non_empty(update.email.as_ref()) {
        Some(raw) => {
            let email = normalize_email(&raw);
            validate_email(&email).map_err(PlatformError::validation)?;
            Some(email)
        }
        None => None,
    };

    let changes = UpdateUserRequest {
        first_name: non_empty(update.first_name.as_ref()),
        last_name: non_empty(update.last_name.as_ref()),
        email,
        birth_date: non_empty(update.birth_date.as_ref()),
        gender: non_empty(update.gender.as_ref()),
        country: non_empty(update.country.as_ref()),
        street: non_empty(update.street.as_ref()),
        number: non_empty(update.number.as_ref()),
        profile_image: None,
    };

    Ok(changes)
}

pub async fn update_profile(
    service: &UserService,
    request: &HttpRequest,
    update: UpdateProfileRequest,
) -> ActixResult<HttpResponse> {
    let identity = RequireSession::require_identity(request)?;

    // 管理员资料不可编辑
    if identity.role == UserRole::Admin {
        return Err(PlatformError::forbidden("Admins cannot edit their profile").into());
    }

    let changes = build_profile_update(&update)?;

    match service.storage.update_user(identity.user_id, changes).await? {
        Some(user) => {
            info!("User {} updated profile", user.id);
            Ok(HttpResponse::Ok().json(user))
        }
        None => Err(PlatformError::not_found("User not found").into()),
    }
}

pub async fn update_profile_image(
    service: &UserService,
    request: &HttpRequest,
    update: UpdateProfileImageRequest,
) -> ActixResult<HttpResponse> {
    let user_id = RequireSession::require_identity(request)?.user_id;

    let image_path = update
        .image_path
        .ok_or_else(|| PlatformError::validation("Missing fields: imagePath"))?;

    // 空字符串表示清除头像
    let profile_image = if image_path.trim().is_empty() {
        None
    } else {
        validate_data_url(&image_path, IMAGE_PREFIX, "Profile image must be an image data URL")?;
        Some(image_path)
    };

    let changes = UpdateUserRequest {
        profile_image: Some(profile_image),
        ..Default::default()
    };

    match service.storage.update_user(user_id, changes).await? {
        Some(user) => Ok(HttpResponse::Ok().json(user)),
        None => Err(PlatformError::not_found("User not found").into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_fields_are_ignored() {
        let update = UpdateProfileRequest {
            first_name: Some("Grace".to_string()),
            last_name: Some("  ".to_string()),
            ..Default::default()
        };
        let changes = build_profile_update(&update).unwrap();
        assert_eq!(changes.first_name.as_deref(), Some("Grace"));
        assert!(changes.last_name.is_none());
        assert!(changes.profile_image.is_none());
    }

    #[test]
    fn test_invalid_email_is_rejected() {
        let update = UpdateProfileRequest {
            email: Some("not-an-email".to_string()),
            ..Default::default()
        };
        assert_eq!(build_profile_update(&update).unwrap_err().code(), "E007");
    }
}
