//! 课程申请审批、课程维护与选课的 HTTP 集成测试

mod common;

use actix_web::http::{Method, StatusCode};
use actix_web::test;
use serde_json::{Value, json};

use common::{SESSION_HEADER, build_app, login_as, seed_user, test_state};
use rust_learning_platform::models::users::entities::UserRole;

#[actix_web::test]
async fn test_course_request_approval_flow() {
    let state = test_state().await;
    let admin = seed_user(&state, UserRole::Admin, "admin@example.com").await;
    let professor = seed_user(&state, UserRole::Profesor, "prof@example.com").await;
    let admin_token = login_as(&state, &admin).await;
    let prof_token = login_as(&state, &professor).await;
    let app = test::init_service(build_app(&state)).await;

    let req = test::TestRequest::post()
        .uri("/api/courses/request")
        .insert_header((SESSION_HEADER, prof_token.clone()))
        .set_json(json!({ "name": "Rust 101", "description": "Ownership and borrowing" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["status"], "PENDING");
    assert_eq!(created["professorId"], professor.id);
    let request_id = created["id"].as_i64().unwrap();

    let req = test::TestRequest::get()
        .uri("/api/admin/course-requests?status=PENDING")
        .insert_header((SESSION_HEADER, admin_token.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let pending: Value = test::read_body_json(resp).await;
    assert_eq!(pending.as_array().unwrap().len(), 1);

    let req = test::TestRequest::post()
        .uri(&format!("/api/admin/course-requests/{request_id}/approve"))
        .insert_header((SESSION_HEADER, admin_token.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let approved: Value = test::read_body_json(resp).await;
    assert_eq!(approved["request"]["status"], "APPROVED");
    assert_eq!(approved["course"]["name"], "Rust 101");
    assert_eq!(approved["course"]["professorId"], professor.id);
    assert_eq!(approved["request"]["courseId"], approved["course"]["id"]);

    // 已处理的申请不能再次批准或驳回
    let req = test::TestRequest::post()
        .uri(&format!("/api/admin/course-requests/{request_id}/approve"))
        .insert_header((SESSION_HEADER, admin_token.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::post()
        .uri(&format!("/api/admin/course-requests/{request_id}/reject"))
        .insert_header((SESSION_HEADER, admin_token))
        .set_json(json!({ "reason": "too late" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::get()
        .uri("/api/courses/my-courses")
        .insert_header((SESSION_HEADER, prof_token.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let courses: Value = test::read_body_json(resp).await;
    assert_eq!(courses.as_array().unwrap().len(), 1);

    let req = test::TestRequest::get()
        .uri("/api/courses/my-requests")
        .insert_header((SESSION_HEADER, prof_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let requests: Value = test::read_body_json(resp).await;
    assert_eq!(requests[0]["status"], "APPROVED");
}

#[actix_web::test]
async fn test_course_request_rejection_rules() {
    let state = test_state().await;
    let admin = seed_user(&state, UserRole::Admin, "admin@example.com").await;
    let professor = seed_user(&state, UserRole::Profesor, "prof@example.com").await;
    let admin_token = login_as(&state, &admin).await;
    let app = test::init_service(build_app(&state)).await;

    let request = state
        .storage
        .create_course_request(professor.id, "Compilers", "Parsing and codegen")
        .await
        .unwrap();

    let req = test::TestRequest::post()
        .uri(&format!("/api/admin/course-requests/{}/reject", request.id))
        .insert_header((SESSION_HEADER, admin_token.clone()))
        .set_json(json!({ "reason": "   " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Rejection reason is required");

    // 不带请求体同样缺少原因
    let req = test::TestRequest::post()
        .uri(&format!("/api/admin/course-requests/{}/reject", request.id))
        .insert_header((SESSION_HEADER, admin_token.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/admin/course-requests/9999/reject")
        .insert_header((SESSION_HEADER, admin_token.clone()))
        .set_json(json!({ "reason": "Duplicate" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post()
        .uri("/api/admin/course-requests/9999/approve")
        .insert_header((SESSION_HEADER, admin_token.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post()
        .uri(&format!("/api/admin/course-requests/{}/reject", request.id))
        .insert_header((SESSION_HEADER, admin_token))
        .set_json(json!({ "reason": "Duplicate of an existing course" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "REJECTED");
    assert_eq!(body["rejectionReason"], "Duplicate of an existing course");

    let courses = state.storage.list_courses().await.unwrap();
    assert!(courses.is_empty());
}

#[actix_web::test]
async fn test_preflight_skips_session_check() {
    let state = test_state().await;
    let app = test::init_service(build_app(&state)).await;

    let req = test::TestRequest::default()
        .method(Method::OPTIONS)
        .uri("/api/courses")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    // 非预检请求仍需会话
    let req = test::TestRequest::get().uri("/api/courses").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_course_request_requires_professor() {
    let state = test_state().await;
    let student = seed_user(&state, UserRole::Student, "s@example.com").await;
    let professor = seed_user(&state, UserRole::Profesor, "prof@example.com").await;
    let student_token = login_as(&state, &student).await;
    let prof_token = login_as(&state, &professor).await;
    let app = test::init_service(build_app(&state)).await;

    let req = test::TestRequest::post()
        .uri("/api/courses/request")
        .insert_header((SESSION_HEADER, student_token))
        .set_json(json!({ "name": "Hack", "description": "nope" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri("/api/courses/request")
        .insert_header((SESSION_HEADER, prof_token.clone()))
        .set_json(json!({ "name": "Only a name" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri("/api/admin/course-requests")
        .insert_header((SESSION_HEADER, prof_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_course_maintenance_by_owner() {
    let state = test_state().await;
    let owner = seed_user(&state, UserRole::Profesor, "owner@example.com").await;
    let other = seed_user(&state, UserRole::Profesor, "other@example.com").await;
    let owner_token = login_as(&state, &owner).await;
    let other_token = login_as(&state, &other).await;
    let app = test::init_service(build_app(&state)).await;

    let request = state
        .storage
        .create_course_request(owner.id, "Networks", "TCP/IP")
        .await
        .unwrap();
    let (_, course) = state.storage.approve_course_request(request.id).await.unwrap();

    let req = test::TestRequest::patch()
        .uri(&format!("/api/courses/{}", course.id))
        .insert_header((SESSION_HEADER, other_token.clone()))
        .set_json(json!({ "name": "Stolen" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::patch()
        .uri(&format!("/api/courses/{}", course.id))
        .insert_header((SESSION_HEADER, owner_token.clone()))
        .set_json(json!({ "name": "  " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::patch()
        .uri(&format!("/api/courses/{}", course.id))
        .insert_header((SESSION_HEADER, owner_token.clone()))
        .set_json(json!({ "name": "Networks II" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["name"], "Networks II");
    assert_eq!(body["description"], "TCP/IP");

    let req = test::TestRequest::post()
        .uri(&format!("/api/courses/{}/material", course.id))
        .insert_header((SESSION_HEADER, owner_token.clone()))
        .set_json(json!({ "materialPath": "data:image/png;base64,AAAA" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri(&format!("/api/courses/{}/material", course.id))
        .insert_header((SESSION_HEADER, owner_token.clone()))
        .set_json(json!({ "materialPath": "data:application/pdf;base64,JVBERi0=" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["materialName"], "material.pdf");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/courses/{}", course.id))
        .insert_header((SESSION_HEADER, other_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/courses/{}", course.id))
        .insert_header((SESSION_HEADER, owner_token.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/courses/{}", course.id))
        .insert_header((SESSION_HEADER, owner_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_enrollment_rules() {
    let state = test_state().await;
    let professor = seed_user(&state, UserRole::Profesor, "prof@example.com").await;
    let student = seed_user(&state, UserRole::Student, "s1@example.com").await;
    let second = seed_user(&state, UserRole::Student, "s2@example.com").await;
    let prof_token = login_as(&state, &professor).await;
    let student_token = login_as(&state, &student).await;
    let app = test::init_service(build_app(&state)).await;

    let request = state
        .storage
        .create_course_request(professor.id, "Algorithms", "Graphs")
        .await
        .unwrap();
    let (_, course) = state.storage.approve_course_request(request.id).await.unwrap();

    let req = test::TestRequest::post()
        .uri(&format!("/api/courses/{}/enroll", course.id))
        .insert_header((SESSION_HEADER, student_token.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let enrollment: Value = test::read_body_json(resp).await;
    assert_eq!(enrollment["courseId"], course.id);
    assert_eq!(enrollment["studentId"], student.id);

    let req = test::TestRequest::post()
        .uri(&format!("/api/courses/{}/enroll", course.id))
        .insert_header((SESSION_HEADER, student_token.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::post()
        .uri("/api/courses/9999/enroll")
        .insert_header((SESSION_HEADER, student_token.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // 教授不能把教授加入课程
    let req = test::TestRequest::post()
        .uri(&format!("/api/courses/{}/enroll-student", course.id))
        .insert_header((SESSION_HEADER, prof_token.clone()))
        .set_json(json!({ "studentId": professor.id }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri(&format!("/api/courses/{}/enroll-student", course.id))
        .insert_header((SESSION_HEADER, prof_token.clone()))
        .set_json(json!({ "studentId": second.id }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::get()
        .uri(&format!("/api/courses/{}/students", course.id))
        .insert_header((SESSION_HEADER, prof_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let students: Value = test::read_body_json(resp).await;
    assert_eq!(students.as_array().unwrap().len(), 2);

    let req = test::TestRequest::get()
        .uri("/api/courses/my-courses")
        .insert_header((SESSION_HEADER, student_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let courses: Value = test::read_body_json(resp).await;
    assert_eq!(courses[0]["id"], course.id);
}
