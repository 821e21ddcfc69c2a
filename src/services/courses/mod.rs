pub mod enroll;
pub mod get;
pub mod list;
pub mod material;
pub mod members;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::{PlatformError, Result};
use crate::models::courses::entities::Course;
use crate::models::courses::requests::{UpdateCourseRequest, UploadMaterialRequest};
use crate::models::enrollments::requests::EnrollStudentRequest;
use crate::services::notifications::Notifier;
use crate::state::AppState;
use crate::storage::Storage;

/// 加载课程，不存在时返回 404
pub(crate) async fn load_course(storage: &Arc<dyn Storage>, course_id: i64) -> Result<Course> {
    storage
        .get_course_by_id(course_id)
        .await?
        .ok_or_else(|| PlatformError::not_found("Course not found"))
}

/// 加载课程并校验归属
pub(crate) async fn load_owned_course(
    storage: &Arc<dyn Storage>,
    course_id: i64,
    user_id: i64,
) -> Result<Course> {
    let course = load_course(storage, course_id).await?;
    if !course.is_owned_by(user_id) {
        return Err(PlatformError::forbidden("You do not own this course"));
    }
    Ok(course)
}

pub struct CourseService {
    storage: Arc<dyn Storage>,
    notifier: Notifier,
}

impl CourseService {
    pub fn new(state: &AppState) -> Self {
        Self {
            storage: state.storage.clone(),
            notifier: state.notifier.clone(),
        }
    }

    // 获取课程列表
    pub async fn list_courses(&self) -> ActixResult<HttpResponse> {
        list::list_courses(self).await
    }

    // 当前用户的课程
    pub async fn list_my_courses(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_my_courses(self, request).await
    }

    // 根据课程 ID 获取课程
    pub async fn get_course(&self, course_id: i64) -> ActixResult<HttpResponse> {
        get::get_course(self, course_id).await
    }

    // 更新课程信息
    pub async fn update_course(
        &self,
        request: &HttpRequest,
        course_id: i64,
        update_data: UpdateCourseRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_course(self, request, course_id, update_data).await
    }

    // 删除课程
    pub async fn delete_course(
        &self,
        request: &HttpRequest,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        update::delete_course(self, request, course_id).await
    }

    // 上传课程资料
    pub async fn upload_material(
        &self,
        request: &HttpRequest,
        course_id: i64,
        data: UploadMaterialRequest,
    ) -> ActixResult<HttpResponse> {
        material::upload_material(self, request, course_id, data).await
    }

    // 学生自助选课
    pub async fn enroll(&self, request: &HttpRequest, course_id: i64) -> ActixResult<HttpResponse> {
        enroll::enroll_self(self, request, course_id).await
    }

    // 教授为学生选课
    pub async fn enroll_student(
        &self,
        request: &HttpRequest,
        course_id: i64,
        data: EnrollStudentRequest,
    ) -> ActixResult<HttpResponse> {
        enroll::enroll_student(self, request, course_id, data).await
    }

    // 课程的学生列表
    pub async fn list_students(
        &self,
        request: &HttpRequest,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        members::list_students(self, request, course_id).await
    }

    // 所有可选的学生
    pub async fn list_available_students(&self) -> ActixResult<HttpResponse> {
        members::list_available_students(self).await
    }

    // 课程下的全部提交
    pub async fn list_course_submissions(
        &self,
        request: &HttpRequest,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        members::list_course_submissions(self, request, course_id).await
    }
}
