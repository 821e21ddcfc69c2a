use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::middlewares;
use crate::models::submissions::requests::{GradeSubmissionRequest, SubmitTaskRequest};
use crate::models::tasks::requests::CreateTaskRequest;
use crate::models::users::entities::UserRole;
use crate::services::{SubmissionService, TaskService};
use crate::state::AppState;

// HTTP处理程序
pub async fn create_task(
    req: HttpRequest,
    state: web::Data<AppState>,
    data: web::Json<CreateTaskRequest>,
) -> ActixResult<HttpResponse> {
    TaskService::new(&state)
        .create_task(&req, data.into_inner())
        .await
}

pub async fn list_course_tasks(
    req: HttpRequest,
    state: web::Data<AppState>,
    course_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    TaskService::new(&state)
        .list_course_tasks(&req, course_id.into_inner())
        .await
}

pub async fn submit_task(
    req: HttpRequest,
    state: web::Data<AppState>,
    task_id: web::Path<i64>,
    data: web::Json<SubmitTaskRequest>,
) -> ActixResult<HttpResponse> {
    SubmissionService::new(&state)
        .submit_task(&req, task_id.into_inner(), data.into_inner())
        .await
}

pub async fn list_task_submissions(
    req: HttpRequest,
    state: web::Data<AppState>,
    task_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    SubmissionService::new(&state)
        .list_task_submissions(&req, task_id.into_inner())
        .await
}

pub async fn list_my_submissions(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> ActixResult<HttpResponse> {
    SubmissionService::new(&state)
        .list_my_submissions(&req)
        .await
}

pub async fn get_submission(
    req: HttpRequest,
    state: web::Data<AppState>,
    submission_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    SubmissionService::new(&state)
        .get_submission(&req, submission_id.into_inner())
        .await
}

pub async fn grade_submission(
    req: HttpRequest,
    state: web::Data<AppState>,
    submission_id: web::Path<i64>,
    data: web::Json<GradeSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    SubmissionService::new(&state)
        .grade_submission(&req, submission_id.into_inner(), data.into_inner())
        .await
}

pub async fn download_submission(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<(i64, i64)>,
) -> ActixResult<HttpResponse> {
    let (task_id, submission_id) = path.into_inner();
    SubmissionService::new(&state)
        .download_submission(&req, task_id, submission_id)
        .await
}

// 配置路由
pub fn configure_task_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/tasks")
            .wrap(middlewares::RequireSession)
            .service(
                web::resource(["", "/"]).route(
                    web::post()
                        .to(create_task)
                        // 课程所有者布置任务
                        .wrap(middlewares::RequireRole::new_any(UserRole::professor_roles())),
                ),
            )
            .service(
                web::resource("/my-submissions").route(
                    web::get()
                        .to(list_my_submissions)
                        .wrap(middlewares::RequireRole::new_any(UserRole::student_roles())),
                ),
            )
            // 课程所有者或已选课学生，服务层校验
            .route("/course/{id}", web::get().to(list_course_tasks))
            .route("/submissions/{id}", web::get().to(get_submission))
            .service(
                web::resource("/submissions/{id}/grade").route(
                    web::post()
                        .to(grade_submission)
                        .wrap(middlewares::RequireRole::new_any(UserRole::professor_roles())),
                ),
            )
            .service(
                web::resource("/{id}/submit").route(
                    web::post()
                        .to(submit_task)
                        .wrap(middlewares::RequireRole::new_any(UserRole::student_roles())),
                ),
            )
            .service(
                web::resource("/{id}/submissions").route(
                    web::get()
                        .to(list_task_submissions)
                        .wrap(middlewares::RequireRole::new_any(UserRole::professor_roles())),
                ),
            )
            .service(
                web::resource("/{task_id}/submissions/{submission_id}/download").route(
                    web::get()
                        .to(download_submission)
                        .wrap(middlewares::RequireRole::new_any(UserRole::professor_roles())),
                ),
            ),
    );
}
