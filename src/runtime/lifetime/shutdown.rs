use tokio::signal;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, warn};

pub async fn listen_for_shutdown() {
    // 等待 Ctrl+C 信号
    if let Err(e) = signal::ctrl_c().await {
        error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    warn!("Shutdown signal received, initiating graceful shutdown...");
}

/// 通知后台分发器退出并等待其完成
pub async fn stop_background_tasks(shutdown_tx: watch::Sender<bool>, dispatcher: JoinHandle<()>) {
    if shutdown_tx.send(true).is_err() {
        warn!("Notification dispatcher already stopped");
    }
    if let Err(e) = dispatcher.await {
        error!("Notification dispatcher terminated abnormally: {}", e);
    }
}
