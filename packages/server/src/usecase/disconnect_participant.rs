//! UseCase: 参加者切断処理
//!
//! レジストリから削除した後、削除前に保持していた表示名で Left をブロードキャストします。
//! 既に削除済みの ID に対する切断通知は何もしません。

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::domain::{
    BroadcastReport, ConnectionId, ConnectionRegistry, Event, MessagePusher, Timestamp,
};

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl DisconnectParticipantUseCase {
    pub fn new(
        registry: Arc<dyn ConnectionRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            message_pusher,
            clock,
        }
    }

    /// 参加者切断を実行
    ///
    /// # Returns
    ///
    /// * `Some(BroadcastReport)` - 削除して Left を配信した
    /// * `None` - 登録されていなかった（重複した切断通知）
    pub async fn execute(&self, connection_id: &ConnectionId) -> Option<BroadcastReport> {
        let removed = self.registry.remove(connection_id).await?;

        let now = Timestamp::new(self.clock.now_jst_millis());
        tracing::info!(
            "Connection '{}' removed after {} ms",
            connection_id,
            removed.connected_at().millis_until(now)
        );

        let left = Event::left(
            connection_id.clone(),
            removed.display_name().clone(),
            self.registry.size().await,
        );
        Some(self.message_pusher.broadcast(&left).await)
    }
}
