//! 集成测试共用的应用构造与数据准备

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use async_trait::async_trait;

use rust_learning_platform::cache::object_cache::moka::MokaCacheWrapper;
use rust_learning_platform::config::{DatabaseConfig, NotificationConfig};
use rust_learning_platform::errors::Result;
use rust_learning_platform::models::users::entities::{User, UserRole};
use rust_learning_platform::models::users::requests::CreateUserRequest;
use rust_learning_platform::routes;
use rust_learning_platform::services::notifications::{
    Mailer, NotificationDispatcher, Notifier, OutgoingEmail,
};
use rust_learning_platform::services::realtime::RealtimeHub;
use rust_learning_platform::session::{SessionIdentity, SessionStore};
use rust_learning_platform::state::AppState;
use rust_learning_platform::storage::create_storage;

pub const SESSION_HEADER: &str = "X-Session-ID";

/// 内存 SQLite 与内存缓存上的完整状态
pub async fn test_state() -> AppState {
    state_with_database(DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        pool_size: 1,
        timeout: 30,
    })
    .await
}

/// 文件 SQLite（WAL，多连接）上的完整状态，用于并发写入测试
///
/// 返回的临时目录需在测试结束前保持存活。
pub async fn file_backed_state(pool_size: u32) -> (AppState, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("platform.db").display());

    let state = state_with_database(DatabaseConfig {
        url,
        pool_size,
        timeout: 30,
    })
    .await;
    (state, dir)
}

async fn state_with_database(config: DatabaseConfig) -> AppState {
    let storage = create_storage(&config)
        .await
        .expect("storage should initialize");

    let cache = Arc::new(MokaCacheWrapper::new(1000));
    let sessions = SessionStore::new(cache, 3600);

    AppState::new(
        storage,
        sessions,
        Notifier::new(),
        Arc::new(RealtimeHub::new()),
    )
}

/// 与 main.rs 相同的路由表
pub fn build_app(
    state: &AppState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody + use<>>,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    build_app_with_json_limit(state, 16 * 1024 * 1024)
}

pub fn build_app_with_json_limit(
    state: &AppState,
    json_limit: usize,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody + use<>>,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    App::new()
        .app_data(web::Data::new(state.clone()))
        .app_data(routes::json_config(json_limit))
        .configure(routes::configure_app)
}

/// 直接写库创建用户
pub async fn seed_user(state: &AppState, role: UserRole, email: &str) -> User {
    seed_user_with_hash(state, role, email, "x".to_string()).await
}

pub async fn seed_user_with_hash(
    state: &AppState,
    role: UserRole,
    email: &str,
    password_hash: String,
) -> User {
    let (first_name, last_name) = match role {
        UserRole::Student => ("Ana", "Student"),
        UserRole::Profesor => ("Pablo", "Profesor"),
        UserRole::Admin => ("Root", "Admin"),
    };

    state
        .storage
        .create_user(CreateUserRequest {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            password_hash,
            role,
            birth_date: String::new(),
            gender: String::new(),
            country: String::new(),
            street: String::new(),
            number: String::new(),
        })
        .await
        .expect("user creation should succeed")
}

/// 为用户签发会话令牌
pub async fn login_as(state: &AppState, user: &User) -> String {
    state
        .sessions
        .create(&SessionIdentity {
            user_id: user.id,
            email: user.email.clone(),
            role: user.role,
        })
        .await
        .expect("session creation should succeed")
}

/// 记录所有发出邮件的测试邮件通道
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<OutgoingEmail>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_to(&self, address: &str) -> Vec<OutgoingEmail> {
        self.sent()
            .into_iter()
            .filter(|email| email.to == address)
            .collect()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<()> {
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

/// 基于测试状态构造分发器
pub fn test_dispatcher(state: &AppState, mailer: Arc<RecordingMailer>) -> NotificationDispatcher {
    NotificationDispatcher::new(
        state.storage.clone(),
        mailer,
        state.hub.clone(),
        state.notifier.clone(),
        &NotificationConfig {
            poll_interval_ms: 50,
            batch_size: 100,
            mail_from: "noreply@test.local".to_string(),
            retention_hours: 72,
        },
    )
}
