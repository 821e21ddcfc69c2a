use crate::cache::create_object_cache;
use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::users::entities::{User, UserRole};
use crate::models::users::requests::CreateUserRequest;
use crate::services::notifications::{LogMailer, NotificationDispatcher, Notifier};
use crate::services::realtime::RealtimeHub;
use crate::session::SessionStore;
use crate::state::AppState;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::random_code::generate_random_password;
use crate::utils::validate::normalize_email;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

pub const DEFAULT_ADMIN_EMAIL: &str = "admin@example.com";

pub struct StartupContext {
    pub state: AppState,
    pub dispatcher: JoinHandle<()>,
    pub shutdown_tx: watch::Sender<bool>,
}

/// 初始化默认管理员账号
/// 如果数据库中没有任何管理员，则创建一个
pub async fn seed_admin(
    storage: &Arc<dyn Storage>,
    email: &str,
    password: Option<String>,
) -> Result<Option<User>> {
    let count = storage.count_users_by_role(UserRole::Admin).await?;
    if count > 0 {
        debug!(
            "Database already has {} admin(s), skipping admin seed",
            count
        );
        return Ok(None);
    }

    info!("No admin found in database, creating default admin account...");

    // 获取密码：优先使用传入值，否则生成随机密码
    let password = password.unwrap_or_else(|| {
        let pwd = generate_random_password(16);
        warn!("==========================================================");
        warn!("  ADMIN PASSWORD NOT SET - USING GENERATED PASSWORD");
        warn!("  Generated admin password: {}", pwd);
        warn!("  Please save this password or set ADMIN_PASSWORD env var");
        warn!("==========================================================");
        pwd
    });

    let admin_request = CreateUserRequest {
        first_name: "System".to_string(),
        last_name: "Administrator".to_string(),
        email: normalize_email(email),
        password_hash: hash_password(&password)?,
        role: UserRole::Admin,
        birth_date: String::new(),
        gender: String::new(),
        country: String::new(),
        street: String::new(),
        number: String::new(),
    };

    let user = storage.create_user(admin_request).await?;
    info!(
        "Default admin account created successfully (ID: {}, email: {})",
        user.id, user.email
    );
    Ok(Some(user))
}

/// 准备服务器启动的上下文
/// 包括存储、缓存、会话与通知分发器
pub async fn prepare_server_startup(config: &AppConfig) -> Result<StartupContext> {
    // 重复安装时返回错误，忽略即可
    let _ = rustls::crypto::ring::default_provider().install_default();

    let storage = crate::storage::create_storage(&config.database).await?;
    warn!("Storage backend initialized and migrations completed");

    // 初始化默认管理员账号（如果需要）
    let admin_email =
        std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| DEFAULT_ADMIN_EMAIL.to_string());
    let admin_password = std::env::var("ADMIN_PASSWORD").ok();
    if let Err(e) = seed_admin(&storage, &admin_email, admin_password).await {
        warn!("Failed to seed admin account: {}", e);
    }

    // 创建缓存实例
    let cache = create_object_cache(&config.cache).await;
    warn!("Cache backend initialized");

    let sessions = SessionStore::new(cache, config.session.ttl_seconds);
    let hub = Arc::new(RealtimeHub::new());
    let notifier = Notifier::new();

    // 启动通知分发器
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let dispatcher = NotificationDispatcher::new(
        storage.clone(),
        Arc::new(LogMailer::new(config.notifications.mail_from.clone())),
        hub.clone(),
        notifier.clone(),
        &config.notifications,
    )
    .spawn(shutdown_rx);

    let state = AppState::new(storage, sessions, notifier, hub);

    Ok(StartupContext {
        state,
        dispatcher,
        shutdown_tx,
    })
}
