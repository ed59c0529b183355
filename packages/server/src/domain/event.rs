//! Event
//!
//! 接続状態の変化とチャットを表す閉じた列挙型。
//! どの種類のイベントかはバリアントだけで決まり、不正な組み合わせは表現できません。

use super::{ConnectionId, DisplayName};

/// Note sent with the unicast welcome.
pub const WELCOME_NOTE: &str = "Your session details";
/// Note broadcast when a connection joins.
pub const JOINED_NOTE: &str = " joined conversation!";
/// Note broadcast when a connection leaves.
pub const LEFT_NOTE: &str = " left conversation!";

/// A relay event. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Sent only to the newly opened connection, never broadcast.
    Welcome {
        session_id: ConnectionId,
        note: String,
    },
    Joined {
        session_id: ConnectionId,
        name: DisplayName,
        note: String,
        participant_count: usize,
    },
    Chat {
        session_id: ConnectionId,
        name: DisplayName,
        text: String,
    },
    Left {
        session_id: ConnectionId,
        name: DisplayName,
        note: String,
        participant_count: usize,
    },
}

impl Event {
    pub fn welcome(session_id: ConnectionId) -> Self {
        Self::Welcome {
            session_id,
            note: WELCOME_NOTE.to_string(),
        }
    }

    pub fn joined(session_id: ConnectionId, name: DisplayName, participant_count: usize) -> Self {
        Self::Joined {
            session_id,
            name,
            note: JOINED_NOTE.to_string(),
            participant_count,
        }
    }

    pub fn chat(session_id: ConnectionId, name: DisplayName, text: impl Into<String>) -> Self {
        Self::Chat {
            session_id,
            name,
            text: text.into(),
        }
    }

    pub fn left(session_id: ConnectionId, name: DisplayName, participant_count: usize) -> Self {
        Self::Left {
            session_id,
            name,
            note: LEFT_NOTE.to_string(),
            participant_count,
        }
    }

    /// Connection the event is about (the sender, or the recipient for `Welcome`).
    pub fn session_id(&self) -> &ConnectionId {
        match self {
            Self::Welcome { session_id, .. }
            | Self::Joined { session_id, .. }
            | Self::Chat { session_id, .. }
            | Self::Left { session_id, .. } => session_id,
        }
    }

    /// Short variant name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Welcome { .. } => "welcome",
            Self::Joined { .. } => "joined",
            Self::Chat { .. } => "chat",
            Self::Left { .. } => "left",
        }
    }

    /// Whether the rendered form carries a participant count.
    pub fn carries_count(&self) -> bool {
        matches!(self, Self::Joined { .. } | Self::Left { .. })
    }

    /// Copy of this event carrying `count` as its participant count.
    ///
    /// Variants without a count are returned unchanged.
    pub fn with_participant_count(&self, count: usize) -> Self {
        match self {
            Self::Joined {
                session_id,
                name,
                note,
                ..
            } => Self::Joined {
                session_id: session_id.clone(),
                name: name.clone(),
                note: note.clone(),
                participant_count: count,
            },
            Self::Left {
                session_id,
                name,
                note,
                ..
            } => Self::Left {
                session_id: session_id.clone(),
                name: name.clone(),
                note: note.clone(),
                participant_count: count,
            },
            other => other.clone(),
        }
    }
}
