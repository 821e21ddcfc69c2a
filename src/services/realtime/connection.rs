use std::sync::Arc;
use std::time::{Duration, Instant};

use actix_ws::Message;
use futures_util::StreamExt;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use super::{RealtimeHub, WsMessage, personal_room};
use crate::session::SessionIdentity;

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(30);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(60);

async fn send_json(session: &mut actix_ws::Session, message: &WsMessage) -> bool {
    match serde_json::to_string(message) {
        Ok(json) => session.text(json).await.is_ok(),
        Err(e) => {
            warn!("Failed to serialize websocket message: {}", e);
            true
        }
    }
}

async fn next_event(rx: &mut broadcast::Receiver<WsMessage>, room: &str) -> Option<WsMessage> {
    loop {
        match rx.recv().await {
            Ok(msg) => return Some(msg),
            Err(broadcast::error::RecvError::Lagged(n)) => {
                warn!("WebSocket room {} lagged by {} messages", room, n);
            }
            Err(broadcast::error::RecvError::Closed) => return None,
        }
    }
}

/// 处理一条已认证的 WebSocket 连接，直到客户端断开或超时
pub async fn handle_connection(
    hub: Arc<RealtimeHub>,
    identity: SessionIdentity,
    mut session: actix_ws::Session,
    mut stream: actix_ws::MessageStream,
) {
    let user_id = identity.user_id;
    let role_room = identity.role.room().to_string();
    let user_room = personal_room(user_id);

    let mut role_rx = hub.join(&role_room);
    let mut user_rx = hub.join(&user_room);
    info!("WebSocket connected for user {} ({})", user_id, role_room);

    let connected = WsMessage::Connected {
        user_id,
        rooms: vec![role_room.clone(), user_room.clone()],
    };

    let mut last_seen = Instant::now();
    let mut heartbeat = tokio::time::interval(HEARTBEAT_INTERVAL);
    // interval 首次 tick 立即完成
    heartbeat.tick().await;

    if send_json(&mut session, &connected).await {
        loop {
            tokio::select! {
                msg = stream.next() => {
                    match msg {
                        Some(Ok(Message::Text(text))) => {
                            last_seen = Instant::now();
                            match serde_json::from_str::<WsMessage>(&text) {
                                Ok(WsMessage::Ping) => {
                                    if !send_json(&mut session, &WsMessage::Pong).await {
                                        break;
                                    }
                                }
                                Ok(other) => {
                                    debug!("Ignoring message from user {}: {:?}", user_id, other);
                                }
                                Err(_) => {
                                    let err = WsMessage::Error {
                                        message: "Unsupported message".to_string(),
                                    };
                                    if !send_json(&mut session, &err).await {
                                        break;
                                    }
                                }
                            }
                        }
                        Some(Ok(Message::Ping(data))) => {
                            last_seen = Instant::now();
                            if session.pong(&data).await.is_err() {
                                break;
                            }
                        }
                        Some(Ok(Message::Pong(_))) => {
                            last_seen = Instant::now();
                        }
                        Some(Ok(Message::Close(_))) | None => {
                            info!("WebSocket closed for user {}", user_id);
                            break;
                        }
                        Some(Err(e)) => {
                            warn!("WebSocket error for user {}: {:?}", user_id, e);
                            break;
                        }
                        _ => {}
                    }
                }

                event = next_event(&mut role_rx, &role_room) => {
                    match event {
                        Some(msg) => {
                            if !send_json(&mut session, &msg).await {
                                break;
                            }
                        }
                        None => break,
                    }
                }

                event = next_event(&mut user_rx, &user_room) => {
                    match event {
                        Some(msg) => {
                            if !send_json(&mut session, &msg).await {
                                break;
                            }
                        }
                        None => break,
                    }
                }

                _ = heartbeat.tick() => {
                    if last_seen.elapsed() > CLIENT_TIMEOUT {
                        info!("WebSocket heartbeat timed out for user {}", user_id);
                        break;
                    }
                    if session.ping(b"").await.is_err() {
                        break;
                    }
                }
            }
        }
    }

    let _ = session.close(None).await;

    drop(role_rx);
    drop(user_rx);
    hub.cleanup(&role_room);
    hub.cleanup(&user_room);
    info!("WebSocket disconnected for user {}", user_id);
}
