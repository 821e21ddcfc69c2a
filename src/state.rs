//! 应用共享状态
//!
//! 启动时显式构造一次，通过 `web::Data<AppState>` 注入到每个请求。

use std::sync::Arc;

use crate::services::notifications::Notifier;
use crate::services::realtime::RealtimeHub;
use crate::session::SessionStore;
use crate::storage::Storage;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
    pub sessions: SessionStore,
    pub notifier: Notifier,
    pub hub: Arc<RealtimeHub>,
}

impl AppState {
    pub fn new(
        storage: Arc<dyn Storage>,
        sessions: SessionStore,
        notifier: Notifier,
        hub: Arc<RealtimeHub>,
    ) -> Self {
        Self {
            storage,
            sessions,
            notifier,
            hub,
        }
    }
}
