pub mod download;
pub mod grade;
pub mod list;
pub mod submit;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::submissions::requests::{GradeSubmissionRequest, SubmitTaskRequest};
use crate::services::notifications::Notifier;
use crate::state::AppState;
use crate::storage::Storage;

pub struct SubmissionService {
    storage: Arc<dyn Storage>,
    notifier: Notifier,
}

impl SubmissionService {
    pub fn new(state: &AppState) -> Self {
        Self {
            storage: state.storage.clone(),
            notifier: state.notifier.clone(),
        }
    }

    // 学生提交任务
    pub async fn submit_task(
        &self,
        request: &HttpRequest,
        task_id: i64,
        data: SubmitTaskRequest,
    ) -> ActixResult<HttpResponse> {
        submit::submit_task(self, request, task_id, data).await
    }

    // 任务的全部提交
    pub async fn list_task_submissions(
        &self,
        request: &HttpRequest,
        task_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_task_submissions(self, request, task_id).await
    }

    // 当前学生的提交
    pub async fn list_my_submissions(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_my_submissions(self, request).await
    }

    // 根据 ID 获取提交
    pub async fn get_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::get_submission(self, request, submission_id).await
    }

    // 评分
    pub async fn grade_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
        data: GradeSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        grade::grade_submission(self, request, submission_id, data).await
    }

    // 下载提交文件
    pub async fn download_submission(
        &self,
        request: &HttpRequest,
        task_id: i64,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        download::download_submission(self, request, task_id, submission_id).await
    }
}
