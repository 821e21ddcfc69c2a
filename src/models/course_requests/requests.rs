use serde::Deserialize;
use ts_rs::TS;

use super::entities::CourseRequestStatus;

// 提交课程申请
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/course_request.ts")]
pub struct SubmitCourseRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

// 驳回课程申请
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/course_request.ts")]
pub struct RejectCourseRequest {
    pub reason: Option<String>,
}

// 课程申请列表查询参数
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/course_request.ts")]
pub struct CourseRequestListParams {
    pub status: Option<CourseRequestStatus>,
}
