//! UseCase: 参加者接続処理
//!
//! 1. Identity Assigner で ID と表示名を決定
//! 2. レジストリに登録
//! 3. 新しい接続にだけ Welcome を送信
//! 4. 全接続（本人を含む）に Joined をブロードキャスト

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::domain::{
    Connection, ConnectionRegistry, Event, IdentityAssigner, MessagePusher, OutboundHandle,
    Timestamp,
};

use super::error::ConnectError;

/// 参加者接続のユースケース
pub struct ConnectParticipantUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl ConnectParticipantUseCase {
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

    /// 参加者接続を実行
    ///
    /// # Arguments
    ///
    /// * `raw_connection_id` - トランスポート層が払い出した ID（そのまま使用）
    /// * `raw_query_name` - クエリ文字列の `name`（パーセントエンコードされたまま）
    /// * `outbound` - この接続へのメッセージ送信ハンドル
    ///
    /// # Returns
    ///
    /// * `Ok(Arc<Connection>)` - 登録された接続
    /// * `Err(ConnectError::DuplicateId)` - 同じ ID が既に登録済み（何も送信しない）
    pub async fn execute(
        &self,
        raw_connection_id: &str,
        raw_query_name: Option<&str>,
        outbound: Arc<dyn OutboundHandle>,
    ) -> Result<Arc<Connection>, ConnectError> {
        // 1. ID と表示名
        let (id, name) = IdentityAssigner::assign(raw_connection_id, raw_query_name);

        // 2. レジストリに登録
        let connected_at = Timestamp::new(self.clock.now_jst_millis());
        let connection = Arc::new(Connection::new(id, name, connected_at, outbound));
        self.registry.add(Arc::clone(&connection)).await?;

        // 3. Welcome（ユニキャスト）
        let welcome = Event::welcome(connection.id().clone());
        if let Err(e) = self.message_pusher.push_to(&connection, &welcome).await {
            tracing::warn!("Failed to send welcome to '{}': {}", connection.id(), e);
        }

        // 4. Joined（本人を含む全接続）
        let joined = Event::joined(
            connection.id().clone(),
            connection.display_name().clone(),
            self.registry.size().await,
        );
        let report = self.message_pusher.broadcast(&joined).await;
        tracing::info!(
            "Broadcasted joined for '{}' ({} delivered, {} failed)",
            connection.id(),
            report.delivered,
            report.failed
        );

        Ok(connection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::{
        codec::JsonMessageCodec,
        message_pusher::{Broadcaster, WebSocketOutbound},
        repository::InMemoryConnectionRegistry,
    };
    use hiroba_shared::time::FixedClock;
    use serde_json::{Value, json};

    fn create_test_usecase() -> (ConnectParticipantUseCase, Arc<InMemoryConnectionRegistry>) {
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let pusher = Arc::new(Broadcaster::new(
            registry.clone(),
            Arc::new(JsonMessageCodec::new()),
        ));
        let usecase = ConnectParticipantUseCase::new(
            registry.clone(),
            pusher,
            Arc::new(FixedClock::new(1_700_000_000_000)),
        );
        (usecase, registry)
    }

    fn drain(rx: &mut tokio::sync::mpsc::UnboundedReceiver<String>) -> Vec<Value> {
        let mut frames = Vec::new();
        while let Ok(text) = rx.try_recv() {
            frames.push(serde_json::from_str(&text).unwrap());
        }
        frames
    }

    #[tokio::test]
    async fn test_connect_sends_welcome_then_joined() {
        // テスト項目: 新規接続には Welcome → Joined（本人の参加通知）の順で届く
        // given (前提条件):
        let (usecase, registry) = create_test_usecase();
        let (outbound, mut rx) = WebSocketOutbound::channel("a".into());

        // when (操作):
        let connection = usecase
            .execute("a", Some("alice"), Arc::new(outbound))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(connection.display_name().as_str(), "alice");
        assert_eq!(connection.connected_at(), Timestamp::new(1_700_000_000_000));
        assert_eq!(registry.size().await, 1);
        assert_eq!(
            drain(&mut rx),
            vec![
                json!({"sessionId": "a", "message": "Your session details"}),
                json!({
                    "sessionId": "a",
                    "name": "alice",
                    "message": " joined conversation!",
                    "count": 1
                }),
            ]
        );
    }

    #[tokio::test]
    async fn test_connect_announces_to_existing_participants() {
        // テスト項目: 既存の参加者にも Joined が届き、Welcome は届かない
        // given (前提条件):
        let (usecase, _registry) = create_test_usecase();
        let (first, mut rx_first) = WebSocketOutbound::channel("a".into());
        usecase.execute("a", None, Arc::new(first)).await.unwrap();
        drain(&mut rx_first);
        let (second, _rx_second) = WebSocketOutbound::channel("b".into());

        // when (操作):
        usecase
            .execute("b", Some("bob"), Arc::new(second))
            .await
            .unwrap();

        // then (期待する結果):
        let frames = drain(&mut rx_first);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0]["sessionId"], "b");
        assert_eq!(frames[0]["name"], "bob");
        assert_eq!(frames[0]["count"], 2);
    }

    #[tokio::test]
    async fn test_connect_with_duplicate_id_is_rejected() {
        // テスト項目: 重複 ID の接続は登録されず、何も送信されない
        // given (前提条件):
        let (usecase, registry) = create_test_usecase();
        let (first, mut rx_first) = WebSocketOutbound::channel("a".into());
        usecase
            .execute("a", Some("alice"), Arc::new(first))
            .await
            .unwrap();
        drain(&mut rx_first);
        let (duplicate, mut rx_duplicate) = WebSocketOutbound::channel("a".into());

        // when (操作):
        let result = usecase
            .execute("a", Some("impostor"), Arc::new(duplicate))
            .await;

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), ConnectError::DuplicateId("a".to_string()));
        assert_eq!(registry.size().await, 1);
        assert!(drain(&mut rx_first).is_empty());
        assert!(drain(&mut rx_duplicate).is_empty());
    }

    #[tokio::test]
    async fn test_connect_survives_failed_welcome() {
        // テスト項目: Welcome の送信に失敗しても接続は登録される
        // given (前提条件):
        let (usecase, registry) = create_test_usecase();
        let (outbound, rx) = WebSocketOutbound::channel("a".into());
        drop(rx);

        // when (操作):
        let result = usecase.execute("a", Some("alice"), Arc::new(outbound)).await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(registry.size().await, 1);
    }
}
