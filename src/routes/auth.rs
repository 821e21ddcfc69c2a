use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::middlewares;
use crate::models::auth::requests::LoginRequest;
use crate::models::users::requests::RegisterRequest;
use crate::services::AuthService;
use crate::state::AppState;

pub async fn register(
    state: web::Data<AppState>,
    user_data: web::Json<RegisterRequest>,
) -> ActixResult<HttpResponse> {
    AuthService::new(&state)
        .register(user_data.into_inner())
        .await
}

pub async fn login(
    state: web::Data<AppState>,
    user_data: web::Json<LoginRequest>,
) -> ActixResult<HttpResponse> {
    AuthService::new(&state).login(user_data.into_inner()).await
}

pub async fn logout(req: HttpRequest, state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    AuthService::new(&state).logout(&req).await
}

pub async fn me(req: HttpRequest, state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    AuthService::new(&state).me(&req).await
}

// 配置路由
pub fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/auth")
            .route("/register", web::post().to(register))
            .route("/login", web::post().to(login))
            .service(
                web::scope("")
                    .wrap(middlewares::RequireSession)
                    .route("/logout", web::post().to(logout))
                    .route("/me", web::get().to(me)),
            ),
    );
}
