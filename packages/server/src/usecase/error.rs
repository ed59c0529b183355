//! UseCase errors
//!
//! いずれも `SessionLifecycleController` がログに記録して吸収し、プロセスは継続します。

use thiserror::Error;

use crate::domain::{DecodeError, RegistryError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    /// The transport handed out an id that is already live.
    #[error("duplicate connection id: {0}")]
    DuplicateId(String),
}

impl From<RegistryError> for ConnectError {
    fn from(error: RegistryError) -> Self {
        match error {
            RegistryError::DuplicateId(id) => Self::DuplicateId(id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendMessageError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// The sender is no longer registered (late or duplicate frame).
    #[error("connection '{0}' is closed")]
    SessionClosed(String),
}
