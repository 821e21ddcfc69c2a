//! 会话存储
//!
//! 会话令牌是随机 UUID，保存在共享的过期键值缓存中。每次解析都重新读取缓存，
//! 不在进程内保留副本。

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cache::{CacheResult, ObjectCache};
use crate::errors::Result;
use crate::models::users::entities::UserRole;

/// 会话中携带的身份信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionIdentity {
    pub user_id: i64,
    pub email: String,
    pub role: UserRole,
}

#[derive(Debug, Serialize, Deserialize)]
struct SessionPayload {
    user_id: i64,
    email: String,
    role: UserRole,
    expires_at: i64,
}

/// 已解析的会话令牌，供注销使用
#[derive(Debug, Clone)]
pub struct SessionToken(pub String);

#[derive(Clone)]
pub struct SessionStore {
    cache: Arc<dyn ObjectCache>,
    ttl_seconds: u64,
}

impl SessionStore {
    pub fn new(cache: Arc<dyn ObjectCache>, ttl_seconds: u64) -> Self {
        Self { cache, ttl_seconds }
    }

    fn key(token: &str) -> String {
        format!("session:{token}")
    }

    /// 为身份创建新会话，返回令牌
    pub async fn create(&self, identity: &SessionIdentity) -> Result<String> {
        let token = uuid::Uuid::new_v4().to_string();
        let payload = SessionPayload {
            user_id: identity.user_id,
            email: identity.email.clone(),
            role: identity.role,
            expires_at: chrono::Utc::now().timestamp() + self.ttl_seconds as i64,
        };

        self.cache
            .insert_raw(
                Self::key(&token),
                serde_json::to_string(&payload)?,
                self.ttl_seconds,
            )
            .await?;

        debug!("Session created for user {}", identity.user_id);
        Ok(token)
    }

    /// 解析令牌；缺失、过期或无法读取时均返回 None
    pub async fn resolve(&self, token: &str) -> Option<SessionIdentity> {
        let token = token.trim();
        if token.is_empty() {
            return None;
        }

        let raw = match self.cache.get_raw(&Self::key(token)).await {
            CacheResult::Found(raw) => raw,
            CacheResult::NotFound => return None,
            CacheResult::ExistsButNoValue => {
                warn!("Session lookup failed, treating session as absent");
                return None;
            }
        };

        let payload: SessionPayload = match serde_json::from_str(&raw) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Discarding malformed session payload: {}", e);
                return None;
            }
        };

        if payload.expires_at <= chrono::Utc::now().timestamp() {
            debug!("Session for user {} has expired", payload.user_id);
            self.cache.remove(&Self::key(token)).await;
            return None;
        }

        Some(SessionIdentity {
            user_id: payload.user_id,
            email: payload.email,
            role: payload.role,
        })
    }

    /// 注销会话
    pub async fn revoke(&self, token: &str) {
        self.cache.remove(&Self::key(token.trim())).await;
    }
}
