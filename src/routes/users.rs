use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::middlewares;
use crate::models::users::requests::{UpdateProfileImageRequest, UpdateProfileRequest};
use crate::services::UserService;
use crate::state::AppState;

pub async fn get_profile(req: HttpRequest, state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    UserService::new(&state).get_profile(&req).await
}

pub async fn update_profile(
    req: HttpRequest,
    state: web::Data<AppState>,
    update_data: web::Json<UpdateProfileRequest>,
) -> ActixResult<HttpResponse> {
    UserService::new(&state)
        .update_profile(&req, update_data.into_inner())
        .await
}

pub async fn update_profile_image(
    req: HttpRequest,
    state: web::Data<AppState>,
    update_data: web::Json<UpdateProfileImageRequest>,
) -> ActixResult<HttpResponse> {
    UserService::new(&state)
        .update_profile_image(&req, update_data.into_inner())
        .await
}

// 配置路由
pub fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/users")
            .wrap(middlewares::RequireSession)
            .service(
                web::resource("/profile")
                    .route(web::get().to(get_profile))
                    .route(web::patch().to(update_profile)),
            )
            .route("/profile/image", web::post().to(update_profile_image)),
    );
}
