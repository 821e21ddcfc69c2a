//! 实时通道握手前的身份校验

mod common;

use actix_web::http::StatusCode;
use actix_web::test;

use common::{build_app, login_as, seed_user, test_state};
use rust_learning_platform::models::users::entities::UserRole;

#[actix_web::test]
async fn test_realtime_connect_requires_matching_session() {
    let state = test_state().await;
    let professor = seed_user(&state, UserRole::Profesor, "prof@example.com").await;
    let token = login_as(&state, &professor).await;
    let app = test::init_service(build_app(&state)).await;

    let req = test::TestRequest::get().uri("/ws").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/ws?session_id=not-a-session")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri(&format!("/ws?session_id={token}&user_id={}", professor.id + 1))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri(&format!("/ws?session_id={token}&role=STUDENT"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // 身份一致但不是 WebSocket 升级请求
    let req = test::TestRequest::get()
        .uri(&format!(
            "/ws?session_id={token}&user_id={}&role=PROFESOR",
            professor.id
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
