//! Domain errors
//!
//! いずれのエラーもプロセスを停止させません。呼び出し側でログに記録して処理を継続します。

use thiserror::Error;

/// Inbound frame could not be turned into chat text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Not a JSON object with a string `message` field.
    #[error("malformed inbound frame: {0}")]
    Malformed(String),
}

/// Delivery to a single recipient failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendError {
    /// The connection's outbound channel has been closed by the transport.
    #[error("outbound channel for '{0}' is closed")]
    ChannelClosed(String),
}

/// Registry invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("connection id '{0}' is already registered")]
    DuplicateId(String),
}
