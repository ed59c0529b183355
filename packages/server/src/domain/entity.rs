//! Entity: Connection
//!
//! 1 つのライブなクライアント接続を表すエンティティ。
//! `outbound` ハンドルはこの Connection だけが所有し、表示名は接続時に一度だけ設定されます。

use std::{fmt, sync::Arc};

use super::{ConnectionId, DisplayName, OutboundHandle, SendError, Timestamp};

/// A live client connection.
pub struct Connection {
    id: ConnectionId,
    display_name: DisplayName,
    connected_at: Timestamp,
    outbound: Arc<dyn OutboundHandle>,
}

impl Connection {
    pub fn new(
        id: ConnectionId,
        display_name: DisplayName,
        connected_at: Timestamp,
        outbound: Arc<dyn OutboundHandle>,
    ) -> Self {
        Self {
            id,
            display_name,
            connected_at,
            outbound,
        }
    }

    pub fn id(&self) -> &ConnectionId {
        &self.id
    }

    pub fn display_name(&self) -> &DisplayName {
        &self.display_name
    }

    pub fn connected_at(&self) -> Timestamp {
        self.connected_at
    }

    /// Push one rendered text frame to this client.
    pub fn send(&self, text: String) -> Result<(), SendError> {
        self.outbound.send(text)
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("id", &self.id)
            .field("display_name", &self.display_name)
            .field("connected_at", &self.connected_at)
            .finish_non_exhaustive()
    }
}
