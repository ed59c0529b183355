//! WebSocket frame DTOs.
//!
//! Every frame is a single JSON object. Outbound field sets are closed.

use serde::{Deserialize, Serialize};

/// Client → relay: `{"message": "<text>"}`. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InboundMessage {
    pub message: String,
}

/// Unicast acknowledgment for a freshly opened connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WelcomeMessage {
    pub session_id: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinedMessage {
    pub session_id: String,
    pub name: String,
    pub message: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub session_id: String,
    pub name: String,
    /// Chat text with a leading space.
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeftMessage {
    pub session_id: String,
    pub name: String,
    pub message: String,
    pub count: usize,
}

/// Any relay → client frame. Serialized without a tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OutboundMessage {
    Welcome(WelcomeMessage),
    Joined(JoinedMessage),
    Chat(ChatMessage),
    Left(LeftMessage),
}
