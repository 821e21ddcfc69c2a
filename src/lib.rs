//! Learning Platform - 多角色在线学习平台后端服务
//!
//! 基于 Actix Web 构建，学生、教授与管理员通过 REST API 管理课程申请、
//! 课程、选课、任务与评分，并通过 WebSocket 接收实时通知。
//!
//! # 架构
//! - `cache`: 缓存层（Moka/Redis）
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `middlewares`: 会话认证与角色授权中间件
//! - `models`: 数据模型定义
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层、通知分发与实时推送
//! - `session`: 会话存储
//! - `state`: 应用共享状态
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod cache;
pub mod config;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod session;
pub mod state;
pub mod storage;
pub mod utils;
