use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::middlewares;
use crate::models::course_requests::requests::SubmitCourseRequest;
use crate::models::courses::requests::{UpdateCourseRequest, UploadMaterialRequest};
use crate::models::enrollments::requests::EnrollStudentRequest;
use crate::models::users::entities::UserRole;
use crate::services::{CourseRequestService, CourseService};
use crate::state::AppState;

// HTTP处理程序
pub async fn submit_course_request(
    req: HttpRequest,
    state: web::Data<AppState>,
    data: web::Json<SubmitCourseRequest>,
) -> ActixResult<HttpResponse> {
    CourseRequestService::new(&state)
        .submit_request(&req, data.into_inner())
        .await
}

pub async fn list_my_requests(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> ActixResult<HttpResponse> {
    CourseRequestService::new(&state)
        .list_my_requests(&req)
        .await
}

pub async fn list_courses(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    CourseService::new(&state).list_courses().await
}

pub async fn list_my_courses(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> ActixResult<HttpResponse> {
    CourseService::new(&state).list_my_courses(&req).await
}

pub async fn list_available_students(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    CourseService::new(&state).list_available_students().await
}

pub async fn get_course(
    state: web::Data<AppState>,
    course_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    CourseService::new(&state)
        .get_course(course_id.into_inner())
        .await
}

pub async fn update_course(
    req: HttpRequest,
    state: web::Data<AppState>,
    course_id: web::Path<i64>,
    update_data: web::Json<UpdateCourseRequest>,
) -> ActixResult<HttpResponse> {
    CourseService::new(&state)
        .update_course(&req, course_id.into_inner(), update_data.into_inner())
        .await
}

pub async fn delete_course(
    req: HttpRequest,
    state: web::Data<AppState>,
    course_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    CourseService::new(&state)
        .delete_course(&req, course_id.into_inner())
        .await
}

pub async fn upload_material(
    req: HttpRequest,
    state: web::Data<AppState>,
    course_id: web::Path<i64>,
    data: web::Json<UploadMaterialRequest>,
) -> ActixResult<HttpResponse> {
    CourseService::new(&state)
        .upload_material(&req, course_id.into_inner(), data.into_inner())
        .await
}

pub async fn enroll(
    req: HttpRequest,
    state: web::Data<AppState>,
    course_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    CourseService::new(&state)
        .enroll(&req, course_id.into_inner())
        .await
}

pub async fn enroll_student(
    req: HttpRequest,
    state: web::Data<AppState>,
    course_id: web::Path<i64>,
    data: web::Json<EnrollStudentRequest>,
) -> ActixResult<HttpResponse> {
    CourseService::new(&state)
        .enroll_student(&req, course_id.into_inner(), data.into_inner())
        .await
}

pub async fn list_students(
    req: HttpRequest,
    state: web::Data<AppState>,
    course_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    CourseService::new(&state)
        .list_students(&req, course_id.into_inner())
        .await
}

pub async fn list_course_submissions(
    req: HttpRequest,
    state: web::Data<AppState>,
    course_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    CourseService::new(&state)
        .list_course_submissions(&req, course_id.into_inner())
        .await
}

// 配置路由
pub fn configure_course_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/courses")
            .wrap(middlewares::RequireSession)
            // 固定路径需在 /{id} 之前注册
            .service(
                web::resource(["", "/"]).route(web::get().to(list_courses)),
            )
            .service(
                web::resource("/request").route(
                    web::post()
                        .to(submit_course_request)
                        // 教授提交课程申请
                        .wrap(middlewares::RequireRole::new_any(UserRole::professor_roles())),
                ),
            )
            .service(
                web::resource("/my-requests").route(
                    web::get()
                        .to(list_my_requests)
                        .wrap(middlewares::RequireRole::new_any(UserRole::professor_roles())),
                ),
            )
            .service(
                web::resource("/my-courses").route(
                    web::get()
                        .to(list_my_courses)
                        // 学生查看已选课程，教授查看自己的课程
                        .wrap(middlewares::RequireRole::new_any(UserRole::registrable_roles())),
                ),
            )
            .service(
                web::resource("/available-students").route(
                    web::get()
                        .to(list_available_students)
                        .wrap(middlewares::RequireRole::new_any(UserRole::professor_roles())),
                ),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_course))
                    .route(
                        web::patch()
                            .to(update_course)
                            // 仅课程所有者，服务层校验归属
                            .wrap(middlewares::RequireRole::new_any(UserRole::professor_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_course)
                            .wrap(middlewares::RequireRole::new_any(UserRole::professor_roles())),
                    ),
            )
            .service(
                web::resource("/{id}/material").route(
                    web::post()
                        .to(upload_material)
                        .wrap(middlewares::RequireRole::new_any(UserRole::professor_roles())),
                ),
            )
            .service(
                web::resource("/{id}/enroll").route(
                    web::post()
                        .to(enroll)
                        // 学生自助选课
                        .wrap(middlewares::RequireRole::new_any(UserRole::student_roles())),
                ),
            )
            .service(
                web::resource("/{id}/enroll-student").route(
                    web::post()
                        .to(enroll_student)
                        .wrap(middlewares::RequireRole::new_any(UserRole::professor_roles())),
                ),
            )
            .service(
                web::resource("/{id}/students").route(
                    web::get()
                        .to(list_students)
                        .wrap(middlewares::RequireRole::new_any(UserRole::professor_roles())),
                ),
            )
            .service(
                web::resource("/{id}/submissions").route(
                    web::get()
                        .to(list_course_submissions)
                        .wrap(middlewares::RequireRole::new_any(UserRole::professor_roles())),
                ),
            ),
    );
}
