//! UseCase layer
//!
//! 接続のライフサイクル（接続・受信・切断）を組み立てるアプリケーションロジック。

pub mod connect_participant;
pub mod disconnect_participant;
pub mod error;
pub mod lifecycle;
pub mod send_message;

pub use connect_participant::ConnectParticipantUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::{ConnectError, SendMessageError};
pub use lifecycle::SessionLifecycleController;
pub use send_message::SendMessageUseCase;
