//! Session Lifecycle Controller
//!
//! トランスポート層から届く 3 つの通知（接続・受信・切断）を各ユースケースに振り分けます。
//! ここから先にエラーは伝播しません。失敗は全てログに記録され、他の接続への配信は継続します。
//!
//! 接続ごとの状態はレジストリへの登録で表されます。
//! 登録済みなら `Open`、未登録（削除済み）なら `Closed` として扱い、
//! `Closed` の接続に対する受信・切断通知は何もしません。

use std::sync::Arc;

use crate::domain::{Connection, ConnectionId, OutboundHandle};

use super::{
    ConnectError, ConnectParticipantUseCase, DisconnectParticipantUseCase, SendMessageError,
    SendMessageUseCase,
};

pub struct SessionLifecycleController {
    connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    send_message_usecase: Arc<SendMessageUseCase>,
    disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
}

impl SessionLifecycleController {
    pub fn new(
        connect_participant_usecase: Arc<ConnectParticipantUseCase>,
        send_message_usecase: Arc<SendMessageUseCase>,
        disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    ) -> Self {
        Self {
            connect_participant_usecase,
            send_message_usecase,
            disconnect_participant_usecase,
        }
    }

    /// A connection was established by the transport.
    ///
    /// Returns the registered connection, or `None` if the id was already live.
    pub async fn on_connection_opened(
        &self,
        raw_connection_id: &str,
        raw_query_name: Option<&str>,
        outbound: Arc<dyn OutboundHandle>,
    ) -> Option<Arc<Connection>> {
        match self
            .connect_participant_usecase
            .execute(raw_connection_id, raw_query_name, outbound)
            .await
        {
            Ok(connection) => {
                tracing::info!(
                    "Connection '{}' opened as '{}'",
                    connection.id(),
                    connection.display_name()
                );
                Some(connection)
            }
            Err(ConnectError::DuplicateId(id)) => {
                tracing::error!(
                    "Internal inconsistency: connection id '{}' is already registered; ignoring",
                    id
                );
                None
            }
        }
    }

    /// A raw text frame arrived from `connection_id`.
    pub async fn on_frame_received(&self, connection_id: &ConnectionId, raw_text: &str) {
        match self
            .send_message_usecase
            .execute(connection_id, raw_text)
            .await
        {
            Ok(report) => tracing::info!(
                "Broadcasted chat from '{}' ({} delivered, {} failed)",
                connection_id,
                report.delivered,
                report.failed
            ),
            Err(SendMessageError::Decode(e)) => {
                tracing::warn!("Dropping frame from '{}': {}", connection_id, e)
            }
            Err(SendMessageError::SessionClosed(_)) => {
                tracing::debug!("Ignoring frame from closed connection '{}'", connection_id)
            }
        }
    }

    /// The transport reported that `connection_id` is gone.
    pub async fn on_connection_closed(&self, connection_id: &ConnectionId) {
        match self
            .disconnect_participant_usecase
            .execute(connection_id)
            .await
        {
            Some(report) => tracing::info!(
                "Broadcasted left for '{}' ({} delivered, {} failed)",
                connection_id,
                report.delivered,
                report.failed
            ),
            None => tracing::debug!(
                "Ignoring close for unknown connection '{}'",
                connection_id
            ),
        }
    }
}
