use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::middlewares;
use crate::models::course_requests::requests::{CourseRequestListParams, RejectCourseRequest};
use crate::models::users::entities::UserRole;
use crate::models::users::requests::{AdminCreateUserRequest, UserListParams};
use crate::services::{CourseRequestService, UserService};
use crate::state::AppState;

pub async fn create_user(
    state: web::Data<AppState>,
    user_data: web::Json<AdminCreateUserRequest>,
) -> ActixResult<HttpResponse> {
    UserService::new(&state)
        .create_user(user_data.into_inner())
        .await
}

pub async fn list_users(
    state: web::Data<AppState>,
    query: web::Query<UserListParams>,
) -> ActixResult<HttpResponse> {
    UserService::new(&state).list_users(query.into_inner()).await
}

pub async fn delete_user(
    req: HttpRequest,
    state: web::Data<AppState>,
    user_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    UserService::new(&state)
        .delete_user(&req, user_id.into_inner())
        .await
}

pub async fn list_course_requests(
    state: web::Data<AppState>,
    query: web::Query<CourseRequestListParams>,
) -> ActixResult<HttpResponse> {
    CourseRequestService::new(&state)
        .list_requests(query.into_inner())
        .await
}

pub async fn approve_course_request(
    state: web::Data<AppState>,
    request_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    CourseRequestService::new(&state)
        .approve_request(request_id.into_inner())
        .await
}

pub async fn reject_course_request(
    state: web::Data<AppState>,
    request_id: web::Path<i64>,
    data: Option<web::Json<RejectCourseRequest>>,
) -> ActixResult<HttpResponse> {
    // 请求体缺失时按未提供原因处理
    let data = data.map(web::Json::into_inner).unwrap_or_default();
    CourseRequestService::new(&state)
        .reject_request(request_id.into_inner(), data)
        .await
}

// 配置路由
pub fn configure_admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/admin")
            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
            .wrap(middlewares::RequireSession)
            .service(
                web::resource("/users")
                    .route(web::get().to(list_users))
                    .route(web::post().to(create_user)),
            )
            .route("/users/{id}", web::delete().to(delete_user))
            .route("/course-requests", web::get().to(list_course_requests))
            .route(
                "/course-requests/{id}/approve",
                web::post().to(approve_course_request),
            )
            .route(
                "/course-requests/{id}/reject",
                web::post().to(reject_course_request),
            ),
    );
}
