//! Domain layer
//!
//! Relay のドメインモデルと、外側の層が実装するインターフェース（trait）を定義します。
//! ドメイン層は Infrastructure 層・UI 層に依存しません。

pub mod codec;
pub mod entity;
pub mod error;
pub mod event;
pub mod factory;
pub mod identity;
pub mod pusher;
pub mod repository;
pub mod session;
pub mod value_object;

pub use codec::MessageCodec;
pub use entity::Connection;
pub use error::{DecodeError, RegistryError, SendError};
pub use event::Event;
pub use factory::ConnectionIdFactory;
pub use identity::IdentityAssigner;
pub use pusher::{BroadcastReport, MessagePusher, OutboundHandle};
pub use repository::ConnectionRegistry;
pub use session::SessionState;
pub use value_object::{ConnectionId, DisplayName, Timestamp};
