//! MessagePusher trait 定義
//!
//! クライアントへのメッセージ送信（通知）の抽象化。
//!
//! - `OutboundHandle`: 1 つの接続へテキストフレームを送る能力（トランスポートが実装）
//! - `MessagePusher`: イベントを描画して 1 接続 / 全接続へ配信するブロードキャストエンジン

use async_trait::async_trait;

use super::{Connection, Event, SendError};

/// Capability to push a text frame to one specific client.
#[cfg_attr(test, mockall::automock)]
pub trait OutboundHandle: Send + Sync {
    fn send(&self, text: String) -> Result<(), SendError>;
}

/// Outcome of one fan-out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Recipients in the snapshot.
    pub targeted: usize,
    /// Recipients whose outbound handle accepted the frame.
    pub delivered: usize,
    /// Recipients whose outbound handle rejected the frame.
    pub failed: usize,
}

#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// Deliver `event` to exactly one connection, bypassing fan-out.
    async fn push_to(&self, connection: &Connection, event: &Event) -> Result<(), SendError>;

    /// Deliver `event` to every registered connection.
    ///
    /// Per-recipient failures are logged and counted, never propagated.
    async fn broadcast(&self, event: &Event) -> BroadcastReport;
}
