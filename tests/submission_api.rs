//! 任务布置、提交、评分与下载的 HTTP 集成测试

mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{Value, json};

use common::{SESSION_HEADER, build_app, login_as, seed_user, test_state};
use rust_learning_platform::models::courses::entities::Course;
use rust_learning_platform::models::users::entities::{User, UserRole};
use rust_learning_platform::state::AppState;

const SOLUTION: &str = "data:text/x-python;base64,cHJpbnQoMSk=";

struct Classroom {
    professor: User,
    student: User,
    course: Course,
}

/// 一位教授、一门已批准的课程和一名已选课学生
async fn classroom(state: &AppState) -> Classroom {
    let professor = seed_user(state, UserRole::Profesor, "prof@example.com").await;
    let student = seed_user(state, UserRole::Student, "student@example.com").await;

    let request = state
        .storage
        .create_course_request(professor.id, "Python", "Scripting basics")
        .await
        .unwrap();
    let (_, course) = state
        .storage
        .approve_course_request(request.id)
        .await
        .unwrap();
    state
        .storage
        .enroll_student(course.id, student.id, false)
        .await
        .unwrap();

    Classroom {
        professor,
        student,
        course,
    }
}

#[actix_web::test]
async fn test_task_submission_and_grading_flow() {
    let state = test_state().await;
    let room = classroom(&state).await;
    let prof_token = login_as(&state, &room.professor).await;
    let student_token = login_as(&state, &room.student).await;
    let app = test::init_service(build_app(&state)).await;

    let req = test::TestRequest::post()
        .uri("/api/tasks")
        .insert_header((SESSION_HEADER, prof_token.clone()))
        .set_json(json!({
            "courseId": room.course.id,
            "title": "Fizzbuzz",
            "description": "Print numbers",
            "deadline": "2025-01-01T00:00:00Z"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let task: Value = test::read_body_json(resp).await;
    assert_eq!(task["courseName"], "Python");
    assert_eq!(task["status"], "CLOSED");
    let task_id = task["id"].as_i64().unwrap();

    let req = test::TestRequest::get()
        .uri(&format!("/api/tasks/course/{}", room.course.id))
        .insert_header((SESSION_HEADER, student_token.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let tasks: Value = test::read_body_json(resp).await;
    assert_eq!(tasks.as_array().unwrap().len(), 1);

    // 截止后的提交仍被接受
    let req = test::TestRequest::post()
        .uri(&format!("/api/tasks/{task_id}/submit"))
        .insert_header((SESSION_HEADER, student_token.clone()))
        .set_json(json!({ "fileRef": SOLUTION }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let submitted: Value = test::read_body_json(resp).await;
    assert_eq!(submitted["message"], "Submission created");
    assert_eq!(submitted["fileName"], "solution.py");
    assert_eq!(submitted["grade"], Value::Null);
    let submission_id = submitted["id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri(&format!("/api/tasks/submissions/{submission_id}/grade"))
        .insert_header((SESSION_HEADER, prof_token.clone()))
        .set_json(json!({ "grade": 5, "comment": "Great work" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let graded: Value = test::read_body_json(resp).await;
    assert_eq!(graded["grade"], 5);
    assert_eq!(graded["comment"], "Great work");
    assert!(graded["gradedAt"].is_string());

    let req = test::TestRequest::get()
        .uri("/api/tasks/my-submissions")
        .insert_header((SESSION_HEADER, student_token.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let mine: Value = test::read_body_json(resp).await;
    assert_eq!(mine[0]["grade"], 5);

    // 重新提交清空评分
    let req = test::TestRequest::post()
        .uri(&format!("/api/tasks/{task_id}/submit"))
        .insert_header((SESSION_HEADER, student_token.clone()))
        .set_json(json!({ "filePath": SOLUTION, "fileName": "v2.py" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let resubmitted: Value = test::read_body_json(resp).await;
    assert_eq!(resubmitted["message"], "Submission updated");
    assert_eq!(resubmitted["id"], submission_id);
    assert_eq!(resubmitted["fileName"], "v2.py");
    assert_eq!(resubmitted["grade"], Value::Null);
    assert_eq!(resubmitted["comment"], Value::Null);
    assert_eq!(resubmitted["gradedAt"], Value::Null);

    let req = test::TestRequest::get()
        .uri(&format!("/api/tasks/{task_id}/submissions"))
        .insert_header((SESSION_HEADER, prof_token.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let submissions: Value = test::read_body_json(resp).await;
    assert_eq!(submissions.as_array().unwrap().len(), 1);

    let req = test::TestRequest::get()
        .uri(&format!(
            "/api/tasks/{task_id}/submissions/{submission_id}/download"
        ))
        .insert_header((SESSION_HEADER, prof_token.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let download: Value = test::read_body_json(resp).await;
    assert_eq!(download["fileName"], "Ana_Student_Fizzbuzz.py");
    assert_eq!(download["fileData"], SOLUTION);

    let req = test::TestRequest::get()
        .uri(&format!("/api/courses/{}/submissions", room.course.id))
        .insert_header((SESSION_HEADER, prof_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let course_submissions: Value = test::read_body_json(resp).await;
    assert_eq!(course_submissions.as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn test_invalid_grades_are_rejected() {
    let state = test_state().await;
    let room = classroom(&state).await;
    let prof_token = login_as(&state, &room.professor).await;
    let app = test::init_service(build_app(&state)).await;

    let task = state
        .storage
        .create_task(rust_learning_platform::models::tasks::requests::NewTask {
            course_id: room.course.id,
            title: "Loops".to_string(),
            description: "for and while".to_string(),
            deadline: chrono::Utc::now() + chrono::Duration::days(7),
        })
        .await
        .unwrap();
    let outcome = state
        .storage
        .submit_task(task.id, room.student.id, SOLUTION, "loops.py")
        .await
        .unwrap();
    let submission_id = outcome.submission.id;

    for body in [
        json!({ "grade": 0 }),
        json!({ "grade": 6 }),
        json!({ "grade": "abc" }),
        json!({ "grade": 4.5 }),
        json!({ "grade": null }),
        json!({ "comment": "no grade" }),
    ] {
        let req = test::TestRequest::post()
            .uri(&format!("/api/tasks/submissions/{submission_id}/grade"))
            .insert_header((SESSION_HEADER, prof_token.clone()))
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    let req = test::TestRequest::post()
        .uri(&format!("/api/tasks/submissions/{submission_id}/grade"))
        .insert_header((SESSION_HEADER, prof_token))
        .set_json(json!({ "grade": "3", "comment": "" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let graded: Value = test::read_body_json(resp).await;
    assert_eq!(graded["grade"], 3);
    assert_eq!(graded["comment"], Value::Null);
}

#[actix_web::test]
async fn test_task_access_rules() {
    let state = test_state().await;
    let room = classroom(&state).await;
    let outsider = seed_user(&state, UserRole::Student, "outsider@example.com").await;
    let rival = seed_user(&state, UserRole::Profesor, "rival@example.com").await;
    let prof_token = login_as(&state, &room.professor).await;
    let outsider_token = login_as(&state, &outsider).await;
    let rival_token = login_as(&state, &rival).await;
    let student_token = login_as(&state, &room.student).await;
    let app = test::init_service(build_app(&state)).await;

    let req = test::TestRequest::post()
        .uri("/api/tasks")
        .insert_header((SESSION_HEADER, prof_token.clone()))
        .set_json(json!({
            "courseId": room.course.id,
            "title": "Bad date",
            "description": "x",
            "deadline": "next friday"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/tasks")
        .insert_header((SESSION_HEADER, rival_token.clone()))
        .set_json(json!({
            "courseId": room.course.id,
            "title": "Not mine",
            "description": "x",
            "deadline": "2030-01-01T00:00:00Z"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri("/api/tasks")
        .insert_header((SESSION_HEADER, student_token.clone()))
        .set_json(json!({
            "courseId": room.course.id,
            "title": "Student task",
            "description": "x",
            "deadline": "2030-01-01T00:00:00Z"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri("/api/tasks")
        .insert_header((SESSION_HEADER, prof_token.clone()))
        .set_json(json!({
            "courseId": room.course.id,
            "title": "Recursion",
            "description": "Factorial",
            "deadline": "2030-01-01T00:00:00"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let task: Value = test::read_body_json(resp).await;
    assert_eq!(task["status"], "ACTIVE");
    let task_id = task["id"].as_i64().unwrap();

    let req = test::TestRequest::get()
        .uri(&format!("/api/tasks/course/{}", room.course.id))
        .insert_header((SESSION_HEADER, outsider_token.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri(&format!("/api/tasks/{task_id}/submit"))
        .insert_header((SESSION_HEADER, outsider_token))
        .set_json(json!({ "filePath": SOLUTION }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri(&format!("/api/tasks/{task_id}/submit"))
        .insert_header((SESSION_HEADER, student_token.clone()))
        .set_json(json!({ "filePath": SOLUTION, "fileName": "notes.txt" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Only .py files are accepted");

    let req = test::TestRequest::post()
        .uri("/api/tasks/9999/submit")
        .insert_header((SESSION_HEADER, student_token.clone()))
        .set_json(json!({ "filePath": SOLUTION }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post()
        .uri(&format!("/api/tasks/{task_id}/submit"))
        .insert_header((SESSION_HEADER, student_token))
        .set_json(json!({ "filePath": SOLUTION }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let submission: Value = test::read_body_json(resp).await;
    let submission_id = submission["id"].as_i64().unwrap();

    let req = test::TestRequest::get()
        .uri(&format!("/api/tasks/submissions/{submission_id}"))
        .insert_header((SESSION_HEADER, rival_token.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri(&format!("/api/tasks/submissions/{submission_id}/grade"))
        .insert_header((SESSION_HEADER, rival_token))
        .set_json(json!({ "grade": 5 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri(&format!("/api/tasks/submissions/{submission_id}"))
        .insert_header((SESSION_HEADER, prof_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}
