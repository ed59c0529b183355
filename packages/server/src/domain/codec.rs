//! MessageCodec trait 定義
//!
//! ワイヤーフォーマットへの変換はドメイン層が必要とするインターフェースとしてここで定義し、
//! 具体的な実装（JSON）は Infrastructure 層が提供します。

use super::{DecodeError, Event};

pub trait MessageCodec: Send + Sync {
    /// Extract chat text from a raw inbound frame.
    fn decode_inbound(&self, raw_text: &str) -> Result<String, DecodeError>;

    /// Render an event into one outbound text frame. Never fails.
    fn encode(&self, event: &Event) -> String;
}
