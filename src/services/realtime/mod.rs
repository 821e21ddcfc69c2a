/*!
 * 实时推送服务
 *
 * 连接按房间分组：角色房间（`admins`、`professors`、`students`）与个人房间
 * `user:{id}`。每个房间是一个广播通道，首次加入时创建，最后一个接收端离开后移除。
 *
 * ## 消息格式
 *
 * ### 服务端推送
 * ```json
 * {"type": "connected", "user_id": 7, "rooms": ["professors", "user:7"]}
 * {"type": "event", "event": "course_request.approved", "data": {}}
 * {"type": "error", "message": "..."}
 * ```
 *
 * ### 心跳
 * ```json
 * {"type": "ping"}
 * {"type": "pong"}
 * ```
 */

pub mod connection;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;

const ROOM_CAPACITY: usize = 100;

/// WebSocket 消息类型
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WsMessage {
    /// 连接成功
    Connected { user_id: i64, rooms: Vec<String> },
    /// 业务事件
    Event {
        event: String,
        data: serde_json::Value,
    },
    /// 心跳请求
    Ping,
    /// 心跳响应
    Pong,
    /// 错误消息
    Error { message: String },
}

/// 个人房间名
pub fn personal_room(user_id: i64) -> String {
    format!("user:{user_id}")
}

/// 房间管理器
pub struct RealtimeHub {
    rooms: DashMap<String, broadcast::Sender<WsMessage>>,
}

impl Default for RealtimeHub {
    fn default() -> Self {
        Self::new()
    }
}

impl RealtimeHub {
    pub fn new() -> Self {
        Self {
            rooms: DashMap::new(),
        }
    }

    /// 加入房间
    pub fn join(&self, room: &str) -> broadcast::Receiver<WsMessage> {
        let entry = self.rooms.entry(room.to_string()).or_insert_with(|| {
            let (tx, _) = broadcast::channel(ROOM_CAPACITY);
            tx
        });
        entry.subscribe()
    }

    /// 移除已无接收端的房间
    pub fn cleanup(&self, room: &str) {
        self.rooms
            .remove_if(room, |_, sender| sender.receiver_count() == 0);
    }

    /// 向房间推送事件，返回收到消息的连接数
    pub fn emit(&self, room: &str, event: &str, data: serde_json::Value) -> usize {
        let Some(sender) = self.rooms.get(room) else {
            debug!("No listeners in room {} for event {}", room, event);
            return 0;
        };

        sender
            .send(WsMessage::Event {
                event: event.to_string(),
                data,
            })
            .unwrap_or(0)
    }

    /// 当前存在的房间数
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// 房间是否有在线连接
    pub fn is_listening(&self, room: &str) -> bool {
        self.rooms
            .get(room)
            .is_some_and(|sender| sender.receiver_count() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_emit_reaches_room_members() {
        let hub = RealtimeHub::new();
        let mut admins = hub.join("admins");
        let mut personal = hub.join(&personal_room(3));

        assert_eq!(hub.emit("admins", "course_request.created", json!({"id": 1})), 1);

        let msg = admins.recv().await.unwrap();
        assert_eq!(
            msg,
            WsMessage::Event {
                event: "course_request.created".to_string(),
                data: json!({"id": 1}),
            }
        );
        assert!(personal.try_recv().is_err());
    }

    #[test]
    fn test_emit_to_empty_room() {
        let hub = RealtimeHub::new();
        assert_eq!(hub.emit("students", "task.created", json!({})), 0);
        assert_eq!(hub.room_count(), 0);
    }

    #[test]
    fn test_cleanup_removes_only_empty_rooms() {
        let hub = RealtimeHub::new();
        let rx = hub.join("professors");
        let _other = hub.join("admins");
        assert_eq!(hub.room_count(), 2);

        hub.cleanup("professors");
        assert!(hub.is_listening("professors"));

        drop(rx);
        hub.cleanup("professors");
        assert!(!hub.is_listening("professors"));
        assert_eq!(hub.room_count(), 1);
    }

    #[test]
    fn test_message_wire_format() {
        let pong = serde_json::to_value(WsMessage::Pong).unwrap();
        assert_eq!(pong, json!({"type": "pong"}));

        let ping: WsMessage = serde_json::from_str(r#"{"type":"ping"}"#).unwrap();
        assert_eq!(ping, WsMessage::Ping);

        let connected = serde_json::to_value(WsMessage::Connected {
            user_id: 4,
            rooms: vec!["students".to_string(), personal_room(4)],
        })
        .unwrap();
        assert_eq!(connected["type"], "connected");
        assert_eq!(connected["rooms"][1], "user:4");
    }
}
