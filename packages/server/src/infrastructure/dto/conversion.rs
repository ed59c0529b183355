//! Conversion logic from domain values to DTOs.

use hiroba_shared::time::timestamp_to_jst_rfc3339;

use crate::domain::{Connection, Event};
use crate::infrastructure::dto::{http, websocket as dto};

// ========================================
// Domain Event → WebSocket DTO
// ========================================

impl From<&Event> for dto::OutboundMessage {
    fn from(event: &Event) -> Self {
        match event {
            Event::Welcome { session_id, note } => Self::Welcome(dto::WelcomeMessage {
                session_id: session_id.to_string(),
                message: note.clone(),
            }),
            Event::Joined {
                session_id,
                name,
                note,
                participant_count,
            } => Self::Joined(dto::JoinedMessage {
                session_id: session_id.to_string(),
                name: name.to_string(),
                message: note.clone(),
                count: *participant_count,
            }),
            Event::Chat {
                session_id,
                name,
                text,
            } => Self::Chat(dto::ChatMessage {
                session_id: session_id.to_string(),
                name: name.to_string(),
                message: format!(" {}", text),
            }),
            Event::Left {
                session_id,
                name,
                note,
                participant_count,
            } => Self::Left(dto::LeftMessage {
                session_id: session_id.to_string(),
                name: name.to_string(),
                message: note.clone(),
                count: *participant_count,
            }),
        }
    }
}

// ========================================
// Domain Entity → HTTP DTO
// ========================================

impl From<&Connection> for http::ParticipantDto {
    fn from(connection: &Connection) -> Self {
        Self {
            session_id: connection.id().to_string(),
            name: connection.display_name().to_string(),
            connected_at: timestamp_to_jst_rfc3339(connection.connected_at().value()),
        }
    }
}
