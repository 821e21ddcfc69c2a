use serde::Serialize;
use ts_rs::TS;

use super::entities::CourseRequest;
use crate::models::courses::entities::Course;

// 批准结果：更新后的申请以及新建的课程
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/course_request.ts")]
pub struct ApproveCourseRequestResponse {
    pub request: CourseRequest,
    pub course: Course,
}
