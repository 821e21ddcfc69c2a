/*!
 * 通知分发
 *
 * 业务写入在同一事务中把事件放入 `notification_outbox`，请求随后调用
 * [`Notifier::wake`] 唤醒后台分发器。分发器以条件更新领取事件（至多一次），
 * 解析收件人后发送邮件并推送实时事件。任何投递失败只记录日志，不影响已提交的数据。
 */

pub mod compose;
pub mod dispatcher;
pub mod mailer;

pub use compose::{Audience, DeliveryPlan, compose, resolve_audience};
pub use dispatcher::NotificationDispatcher;
pub use mailer::{LogMailer, Mailer, OutgoingEmail};

use std::sync::Arc;

use tokio::sync::Notify;

/// 唤醒分发器的句柄
#[derive(Clone, Default)]
pub struct Notifier {
    notify: Arc<Notify>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// 有新事件写入发件箱
    pub fn wake(&self) {
        self.notify.notify_one();
    }

    pub(crate) async fn notified(&self) {
        self.notify.notified().await;
    }
}
