pub mod admin;
pub mod auth;
pub mod courses;
pub mod health;
pub mod realtime;
pub mod tasks;
pub mod users;

pub use admin::configure_admin_routes;
pub use auth::configure_auth_routes;
pub use courses::configure_course_routes;
pub use health::configure_health_routes;
pub use realtime::configure_realtime_routes;
pub use tasks::configure_task_routes;
pub use users::configure_user_routes;

use actix_web::web;

use crate::utils::{json_error_handler, path_error_handler, query_error_handler};

/// JSON 请求体配置，data URL 形式的文件随 JSON 提交，上限取自 `server.limits.max_payload_size`
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(json_error_handler)
}

// 配置全部路由与参数解析错误处理器
pub fn configure_app(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(query_error_handler)) // 设置查询参数错误处理器
        .app_data(web::PathConfig::default().error_handler(path_error_handler)) // 设置路径参数错误处理器
        .configure(configure_health_routes) // 配置健康检查路由
        .configure(configure_auth_routes) // 配置认证相关路由
        .configure(configure_user_routes) // 配置用户资料路由
        .configure(configure_admin_routes) // 配置管理员路由
        .configure(configure_course_routes) // 配置课程相关路由
        .configure(configure_task_routes) // 配置任务与提交路由
        .configure(configure_realtime_routes); // 配置实时通道
}
