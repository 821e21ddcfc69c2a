pub mod create;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::{PlatformError, Result};
use crate::models::courses::entities::Course;
use crate::models::tasks::entities::Task;
use crate::models::tasks::requests::CreateTaskRequest;
use crate::services::courses::load_course;
use crate::services::notifications::Notifier;
use crate::session::SessionIdentity;
use crate::state::AppState;
use crate::storage::Storage;

/// 加载任务，不存在时返回 404
pub(crate) async fn load_task(storage: &Arc<dyn Storage>, task_id: i64) -> Result<Task> {
    storage
        .get_task_by_id(task_id)
        .await?
        .ok_or_else(|| PlatformError::not_found("Task not found"))
}

/// 课程所有者或已选课学生才能访问课程内容
pub(crate) async fn ensure_course_access(
    storage: &Arc<dyn Storage>,
    course_id: i64,
    identity: &SessionIdentity,
) -> Result<Course> {
    let course = load_course(storage, course_id).await?;
    if course.is_owned_by(identity.user_id) {
        return Ok(course);
    }

    if storage
        .get_enrollment(course_id, identity.user_id)
        .await?
        .is_some()
    {
        return Ok(course);
    }

    Err(PlatformError::forbidden(
        "You do not have access to this course",
    ))
}

pub struct TaskService {
    storage: Arc<dyn Storage>,
    notifier: Notifier,
}

impl TaskService {
    pub fn new(state: &AppState) -> Self {
        Self {
            storage: state.storage.clone(),
            notifier: state.notifier.clone(),
        }
    }

    // 创建任务
    pub async fn create_task(
        &self,
        request: &HttpRequest,
        data: CreateTaskRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_task(self, request, data).await
    }

    // 列出课程任务
    pub async fn list_course_tasks(
        &self,
        request: &HttpRequest,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_course_tasks(self, request, course_id).await
    }
}
