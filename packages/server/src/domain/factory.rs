//! Factory: ConnectionId の生成

use uuid::Uuid;

use super::ConnectionId;

pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    /// Generate a fresh connection id (UUID v4, hyphenated).
    pub fn generate() -> ConnectionId {
        ConnectionId::new(Uuid::new_v4().to_string())
    }
}
