//! メッセージ送信（通知）の実装
//!
//! - `websocket`: WebSocket 接続ごとの `OutboundHandle` 実装
//! - `broadcaster`: `MessagePusher` を実装するブロードキャストエンジン

pub mod broadcaster;
pub mod websocket;

pub use broadcaster::Broadcaster;
pub use websocket::{PusherChannel, WebSocketOutbound};
