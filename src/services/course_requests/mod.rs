pub mod decide;
pub mod list;
pub mod submit;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::course_requests::requests::{
    CourseRequestListParams, RejectCourseRequest, SubmitCourseRequest,
};
use crate::services::notifications::Notifier;
use crate::state::AppState;
use crate::storage::Storage;

pub struct CourseRequestService {
    storage: Arc<dyn Storage>,
    notifier: Notifier,
}

impl CourseRequestService {
    pub fn new(state: &AppState) -> Self {
        Self {
            storage: state.storage.clone(),
            notifier: state.notifier.clone(),
        }
    }

    // 教授提交课程申请
    pub async fn submit_request(
        &self,
        request: &HttpRequest,
        data: SubmitCourseRequest,
    ) -> ActixResult<HttpResponse> {
        submit::submit_request(self, request, data).await
    }

    // 教授查看自己的申请
    pub async fn list_my_requests(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_my_requests(self, request).await
    }

    // 管理员查看全部申请
    pub async fn list_requests(&self, query: CourseRequestListParams) -> ActixResult<HttpResponse> {
        list::list_requests(self, query).await
    }

    // 批准申请
    pub async fn approve_request(&self, request_id: i64) -> ActixResult<HttpResponse> {
        decide::approve_request(self, request_id).await
    }

    // 驳回申请
    pub async fn reject_request(
        &self,
        request_id: i64,
        data: RejectCourseRequest,
    ) -> ActixResult<HttpResponse> {
        decide::reject_request(self, request_id, data).await
    }
}
