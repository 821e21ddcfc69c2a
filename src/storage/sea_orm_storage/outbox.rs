use super::SeaOrmStorage;
use crate::entity::notification_outbox::{ActiveModel, Column, Entity as NotificationOutbox};
use crate::entity::timestamp_to_utc;
use crate::errors::{PlatformError, Result};
use crate::models::notifications::entities::{NotificationEvent, OutboxEntry};
use crate::storage::ClaimedBatch;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, sea_query::Expr,
};
use tracing::warn;

/// 在调用方的事务中写入一条待分发事件
pub(super) async fn enqueue_event<C: ConnectionTrait>(
    conn: &C,
    event: &NotificationEvent,
) -> Result<()> {
    let payload = serde_json::to_string(event)?;

    ActiveModel {
        event_type: Set(event.event_name().to_string()),
        payload: Set(payload),
        created_at: Set(chrono::Utc::now().timestamp()),
        dispatched_at: Set(None),
        ..Default::default()
    }
    .insert(conn)
    .await
    .map_err(|e| PlatformError::database_operation(format!("写入通知发件箱失败: {e}")))?;

    Ok(())
}

impl SeaOrmStorage {
    /// 领取一批待分发事件
    ///
    /// 每条记录通过 `dispatched_at IS NULL` 条件更新领取，
    /// 多个分发器并行时同一事件只会被其中一个拿到。
    pub async fn claim_outbox_batch_impl(&self, limit: u64) -> Result<ClaimedBatch> {
        let pending = NotificationOutbox::find()
            .filter(Column::DispatchedAt.is_null())
            .order_by_asc(Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| PlatformError::database_operation(format!("查询通知发件箱失败: {e}")))?;

        let now = chrono::Utc::now().timestamp();
        let fetched = pending.len();
        let mut entries = Vec::with_capacity(fetched);

        for row in pending {
            let result = NotificationOutbox::update_many()
                .col_expr(Column::DispatchedAt, Expr::value(now))
                .filter(Column::Id.eq(row.id))
                .filter(Column::DispatchedAt.is_null())
                .exec(&self.db)
                .await
                .map_err(|e| {
                    PlatformError::database_operation(format!("领取通知事件失败: {e}"))
                })?;

            if result.rows_affected == 0 {
                continue;
            }

            match serde_json::from_str::<NotificationEvent>(&row.payload) {
                Ok(event) => entries.push(OutboxEntry {
                    id: row.id,
                    event,
                    created_at: timestamp_to_utc(row.created_at),
                }),
                Err(e) => warn!(
                    "Dropping undecodable outbox entry {} ({}): {}",
                    row.id, row.event_type, e
                ),
            }
        }

        Ok(ClaimedBatch { fetched, entries })
    }

    /// 清理已分发的历史事件
    pub async fn purge_dispatched_outbox_impl(
        &self,
        before: chrono::DateTime<chrono::Utc>,
    ) -> Result<u64> {
        let result = NotificationOutbox::delete_many()
            .filter(Column::DispatchedAt.is_not_null())
            .filter(Column::DispatchedAt.lt(before.timestamp()))
            .exec(&self.db)
            .await
            .map_err(|e| PlatformError::database_operation(format!("清理通知发件箱失败: {e}")))?;

        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;

    #[tokio::test]
    async fn test_claim_counts_undecodable_rows() {
        let storage = SeaOrmStorage::connect(&DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            pool_size: 1,
            timeout: 30,
        })
        .await
        .unwrap();

        ActiveModel {
            event_type: Set("course.unknown".to_string()),
            payload: Set("{not json".to_string()),
            created_at: Set(chrono::Utc::now().timestamp()),
            dispatched_at: Set(None),
            ..Default::default()
        }
        .insert(&storage.db)
        .await
        .unwrap();
        enqueue_event(
            &storage.db,
            &NotificationEvent::CourseMaterialUploaded {
                course_id: 1,
                course_name: "Rust 101".to_string(),
                file_name: "notes.pdf".to_string(),
            },
        )
        .await
        .unwrap();

        let batch = storage.claim_outbox_batch_impl(10).await.unwrap();
        assert_eq!(batch.fetched, 2);
        assert_eq!(batch.entries.len(), 1);

        // 无法解析的记录也已被领取，不会反复出现
        let batch = storage.claim_outbox_batch_impl(10).await.unwrap();
        assert_eq!(batch.fetched, 0);
    }
}
