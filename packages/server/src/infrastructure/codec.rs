//! JSON implementation of `MessageCodec`.

use serde_json::Value;

use crate::domain::{DecodeError, Event, MessageCodec};
use crate::infrastructure::dto::websocket::{InboundMessage, OutboundMessage};

/// Encodes events as single JSON objects and decodes `{"message": ...}` frames.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonMessageCodec;

impl JsonMessageCodec {
    pub fn new() -> Self {
        Self
    }
}

impl MessageCodec for JsonMessageCodec {
    fn decode_inbound(&self, raw_text: &str) -> Result<String, DecodeError> {
        let value: Value =
            serde_json::from_str(raw_text).map_err(|e| DecodeError::Malformed(e.to_string()))?;

        // serde also accepts a sequence for a struct, so the object shape is checked first.
        if !value.is_object() {
            return Err(DecodeError::Malformed("expected a JSON object".to_string()));
        }

        serde_json::from_value::<InboundMessage>(value)
            .map(|inbound| inbound.message)
            .map_err(|e| DecodeError::Malformed(e.to_string()))
    }

    fn encode(&self, event: &Event) -> String {
        let dto = OutboundMessage::from(event);
        // Outbound DTOs hold only strings and integers, so serialization cannot fail.
        serde_json::to_string(&dto).unwrap_or_else(|e| {
            tracing::error!("Failed to serialize {} event: {}", event.kind(), e);
            String::from("{}")
        })
    }
}
