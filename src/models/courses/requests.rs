use serde::Deserialize;
use ts_rs::TS;

// 课程更新请求
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/generated/course.ts")]
pub struct UpdateCourseRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

// 课程资料上传请求
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../client/src/types/generated/course.ts")]
pub struct UploadMaterialRequest {
    pub material_path: Option<String>,
    pub file_name: Option<String>,
}
