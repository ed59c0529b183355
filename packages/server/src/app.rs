//! Dependency wiring for the in-memory relay.

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::{
    infrastructure::{
        codec::JsonMessageCodec, message_pusher::Broadcaster,
        repository::InMemoryConnectionRegistry,
    },
    ui::Server,
    usecase::{
        ConnectParticipantUseCase, DisconnectParticipantUseCase, SendMessageUseCase,
        SessionLifecycleController,
    },
};

/// Build a relay server backed by an in-memory registry.
///
/// Dependencies are created in order:
/// 1. Registry and codec
/// 2. Broadcaster (MessagePusher)
/// 3. UseCases and the lifecycle controller
/// 4. Server
pub fn build_server(clock: Arc<dyn Clock>) -> Server {
    // 1. Registry (single shared instance) and codec
    let registry = Arc::new(InMemoryConnectionRegistry::new());
    let codec = Arc::new(JsonMessageCodec::new());

    // 2. Broadcast engine
    let message_pusher = Arc::new(Broadcaster::new(registry.clone(), codec.clone()));

    // 3. UseCases
    let connect_participant_usecase = Arc::new(ConnectParticipantUseCase::new(
        registry.clone(),
        message_pusher.clone(),
        clock.clone(),
    ));
    let send_message_usecase = Arc::new(SendMessageUseCase::new(
        registry.clone(),
        message_pusher.clone(),
        codec,
    ));
    let disconnect_participant_usecase = Arc::new(DisconnectParticipantUseCase::new(
        registry.clone(),
        message_pusher,
        clock,
    ));
    let lifecycle = Arc::new(SessionLifecycleController::new(
        connect_participant_usecase,
        send_message_usecase,
        disconnect_participant_usecase,
    ));

    // 4. Server
    Server::new(lifecycle, registry)
}
