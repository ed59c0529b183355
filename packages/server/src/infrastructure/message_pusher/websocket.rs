//! WebSocket を使った OutboundHandle 実装
//!
//! ## 設計ノート
//!
//! WebSocket の sink は UI 層（`ui/handler/websocket.rs`）の pusher タスクが所有します。
//! この実装は pusher タスクへつながる `UnboundedSender` だけを保持するため、
//! `send` がブロックすることはありません。
//! pusher タスクが終了した（ソケットへの書き込みに失敗した）後の送信は
//! `SendError::ChannelClosed` になります。

use tokio::sync::mpsc;

use crate::domain::{ConnectionId, OutboundHandle, SendError};

/// Channel feeding one connection's pusher task.
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Outbound handle for one WebSocket connection.
pub struct WebSocketOutbound {
    connection_id: ConnectionId,
    sender: PusherChannel,
}

impl WebSocketOutbound {
    pub fn new(connection_id: ConnectionId, sender: PusherChannel) -> Self {
        Self {
            connection_id,
            sender,
        }
    }

    /// Create a handle together with the receiver its pusher task drains.
    pub fn channel(connection_id: ConnectionId) -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(connection_id, tx), rx)
    }
}

impl OutboundHandle for WebSocketOutbound {
    fn send(&self, text: String) -> Result<(), SendError> {
        self.sender
            .send(text)
            .map_err(|_| SendError::ChannelClosed(self.connection_id.to_string()))
    }
}
