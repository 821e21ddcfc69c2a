use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::compose::{compose, resolve_audience};
use super::mailer::Mailer;
use super::Notifier;
use crate::config::NotificationConfig;
use crate::errors::Result;
use crate::models::notifications::entities::OutboxEntry;
use crate::services::realtime::RealtimeHub;
use crate::storage::Storage;

const PURGE_INTERVAL: Duration = Duration::from_secs(3600);

/// 后台通知分发器
pub struct NotificationDispatcher {
    storage: Arc<dyn Storage>,
    mailer: Arc<dyn Mailer>,
    hub: Arc<RealtimeHub>,
    notifier: Notifier,
    poll_interval: Duration,
    batch_size: u64,
    retention: chrono::Duration,
}

impl NotificationDispatcher {
    pub fn new(
        storage: Arc<dyn Storage>,
        mailer: Arc<dyn Mailer>,
        hub: Arc<RealtimeHub>,
        notifier: Notifier,
        config: &NotificationConfig,
    ) -> Self {
        Self {
            storage,
            mailer,
            hub,
            notifier,
            poll_interval: Duration::from_millis(config.poll_interval_ms.max(10)),
            batch_size: config.batch_size.max(1),
            retention: chrono::Duration::hours(config.retention_hours.max(0)),
        }
    }

    /// 领取并分发一批事件，返回领取到的事件数
    pub async fn run_once(&self) -> Result<usize> {
        let (_, claimed) = self.dispatch_batch().await?;
        Ok(claimed)
    }

    /// 返回 (查询到的记录数, 领取到的事件数)
    async fn dispatch_batch(&self) -> Result<(usize, usize)> {
        let batch = self.storage.claim_outbox_batch(self.batch_size).await?;
        let claimed = batch.entries.len();

        for entry in &batch.entries {
            self.deliver(entry).await;
        }

        if claimed > 0 {
            debug!(
                "Dispatched {} of {} fetched notification events",
                claimed, batch.fetched
            );
        }
        Ok((batch.fetched, claimed))
    }

    async fn deliver(&self, entry: &OutboxEntry) {
        let audience = match resolve_audience(&self.storage, &entry.event).await {
            Ok(audience) => audience,
            Err(e) => {
                warn!(
                    "Failed to resolve recipients for event {} ({}): {}",
                    entry.id,
                    entry.event.event_name(),
                    e
                );
                return;
            }
        };

        let plan = compose(&entry.event, &audience);

        for email in &plan.emails {
            if let Err(e) = self.mailer.send(email).await {
                warn!(
                    "Failed to send {} email to {}: {}",
                    plan.event, email.to, e
                );
            }
        }

        for room in &plan.rooms {
            self.hub.emit(room, plan.event, plan.data.clone());
        }
    }

    /// 清理超过保留时长的已分发事件
    pub async fn purge(&self) -> Result<u64> {
        let cutoff = chrono::Utc::now() - self.retention;
        let removed = self.storage.purge_dispatched_outbox(cutoff).await?;
        if removed > 0 {
            info!("Purged {} dispatched notification events", removed);
        }
        Ok(removed)
    }

    async fn drain(&self) {
        loop {
            match self.dispatch_batch().await {
                // 满批说明可能还有积压，被抢走或丢弃的记录同样计入
                Ok((fetched, _)) if fetched as u64 >= self.batch_size => continue,
                Ok(_) => break,
                Err(e) => {
                    error!("Notification dispatch failed: {}", e);
                    break;
                }
            }
        }
    }

    /// 在后台运行，直到收到关闭信号
    pub fn spawn(self, mut shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(async move {
            info!("Notification dispatcher started");
            let mut last_purge = Instant::now();

            loop {
                self.drain().await;

                if last_purge.elapsed() >= PURGE_INTERVAL {
                    if let Err(e) = self.purge().await {
                        error!("Failed to purge notification outbox: {}", e);
                    }
                    last_purge = Instant::now();
                }

                tokio::select! {
                    _ = self.notifier.notified() => {}
                    _ = tokio::time::sleep(self.poll_interval) => {}
                    changed = shutdown.changed() => {
                        let stop = changed.is_err() || *shutdown.borrow();
                        if stop {
                            break;
                        }
                    }
                }
            }

            // 退出前处理剩余事件
            self.drain().await;
            info!("Notification dispatcher stopped");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::entity::notification_outbox::ActiveModel;
    use crate::models::notifications::entities::NotificationEvent;
    use crate::services::notifications::LogMailer;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use sea_orm::{ActiveModelTrait, Set};

    async fn insert_raw(storage: &SeaOrmStorage, event_type: &str, payload: String) {
        ActiveModel {
            event_type: Set(event_type.to_string()),
            payload: Set(payload),
            created_at: Set(chrono::Utc::now().timestamp()),
            dispatched_at: Set(None),
            ..Default::default()
        }
        .insert(&storage.db)
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_drain_continues_past_dropped_rows() {
        let storage = SeaOrmStorage::connect(&DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            pool_size: 1,
            timeout: 30,
        })
        .await
        .unwrap();

        insert_raw(&storage, "course.unknown", "{not json".to_string()).await;
        let event = NotificationEvent::CourseMaterialUploaded {
            course_id: 1,
            course_name: "Rust 101".to_string(),
            file_name: "notes.pdf".to_string(),
        };
        insert_raw(
            &storage,
            event.event_name(),
            serde_json::to_string(&event).unwrap(),
        )
        .await;

        let storage: Arc<dyn Storage> = Arc::new(storage);
        let dispatcher = NotificationDispatcher::new(
            storage.clone(),
            Arc::new(LogMailer::new("noreply@test.local")),
            Arc::new(RealtimeHub::new()),
            Notifier::new(),
            &NotificationConfig {
                poll_interval_ms: 50,
                batch_size: 1,
                mail_from: "noreply@test.local".to_string(),
                retention_hours: 72,
            },
        );

        // 第一批只取到无法解析的记录，仍应继续处理后续积压
        dispatcher.drain().await;

        let remaining = storage.claim_outbox_batch(10).await.unwrap();
        assert_eq!(remaining.fetched, 0);
    }
}
