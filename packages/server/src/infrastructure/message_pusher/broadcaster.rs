//! Broadcast engine
//!
//! レジストリのスナップショットを取り、各接続ごとにイベントを描画して配信します。
//!
//! - 参加者数（`count`）は受信者ごとの描画時点のレジストリサイズを使う。
//!   ブロードキャスト中に参加・退出があると、最初と最後の受信者で値が異なることがある。
//! - 1 つの受信者への配信失敗はログに記録して残りの受信者への配信を続ける。
//!   失敗した接続をレジストリから削除することはない（削除はトランスポートの切断通知のみ）。

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{
    BroadcastReport, Connection, ConnectionRegistry, Event, MessageCodec, MessagePusher, SendError,
};

pub struct Broadcaster {
    /// 配信先（読み取りのみ）
    registry: Arc<dyn ConnectionRegistry>,
    codec: Arc<dyn MessageCodec>,
}

impl Broadcaster {
    pub fn new(registry: Arc<dyn ConnectionRegistry>, codec: Arc<dyn MessageCodec>) -> Self {
        Self { registry, codec }
    }

    /// Render `event` for one recipient.
    async fn render(&self, event: &Event) -> String {
        if event.carries_count() {
            let count = self.registry.size().await;
            self.codec.encode(&event.with_participant_count(count))
        } else {
            self.codec.encode(event)
        }
    }
}

#[async_trait]
impl MessagePusher for Broadcaster {
    async fn push_to(&self, connection: &Connection, event: &Event) -> Result<(), SendError> {
        let text = self.render(event).await;
        connection.send(text)?;
        tracing::debug!(
            "Pushed {} event to '{}'",
            event.kind(),
            connection.id()
        );
        Ok(())
    }

    async fn broadcast(&self, event: &Event) -> BroadcastReport {
        let targets = self.registry.snapshot().await;
        let mut report = BroadcastReport {
            targeted: targets.len(),
            ..BroadcastReport::default()
        };

        for target in &targets {
            let text = self.render(event).await;
            match target.send(text) {
                Ok(()) => {
                    report.delivered += 1;
                    tracing::debug!(
                        "Broadcasted {} event from '{}' to '{}'",
                        event.kind(),
                        event.session_id(),
                        target.id()
                    );
                }
                Err(e) => {
                    report.failed += 1;
                    tracing::warn!(
                        "Failed to deliver {} event to '{}': {}",
                        event.kind(),
                        target.id(),
                        e
                    );
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{
            ConnectionId, DisplayName, OutboundHandle, Timestamp, pusher::MockOutboundHandle,
        },
        infrastructure::{
            codec::JsonMessageCodec, message_pusher::WebSocketOutbound,
            repository::InMemoryConnectionRegistry,
        },
    };
    use serde_json::Value;
    use std::{
        sync::atomic::{AtomicBool, Ordering},
        time::Duration,
    };
    use tokio::sync::mpsc;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - broadcast: スナップショット内の全接続への配信
    // - push_to: 1 接続への直接配信
    // - 一部の受信者が失敗しても残りに配信されること
    //
    // 【どのようなシナリオをテストするか】
    // 1. N 接続への Chat 配信がちょうど N 件になる
    // 2. 3 接続中 1 接続が失敗しても残り 2 接続に届く
    // 3. count は描画時点のレジストリサイズになる
    // 4. 接続がなければ何も配信しない
    // 5. 配信中にレジストリのロックを保持しない（送信中に新規参加できる）
    // ========================================

    fn create_test_broadcaster() -> (Broadcaster, Arc<InMemoryConnectionRegistry>) {
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let broadcaster = Broadcaster::new(registry.clone(), Arc::new(JsonMessageCodec::new()));
        (broadcaster, registry)
    }

    fn connection_with(id: &str, name: &str, outbound: Arc<dyn OutboundHandle>) -> Arc<Connection> {
        Arc::new(Connection::new(
            ConnectionId::new(id),
            DisplayName::new(name),
            Timestamp::new(0),
            outbound,
        ))
    }

    async fn register_channel(
        registry: &InMemoryConnectionRegistry,
        id: &str,
        name: &str,
    ) -> mpsc::UnboundedReceiver<String> {
        let (outbound, rx) = WebSocketOutbound::channel(id.into());
        registry
            .add(connection_with(id, name, Arc::new(outbound)))
            .await
            .unwrap();
        rx
    }

    fn next_json(rx: &mut mpsc::UnboundedReceiver<String>) -> Value {
        let text = rx.try_recv().expect("a frame should have been pushed");
        serde_json::from_str(&text).unwrap()
    }

    #[tokio::test]
    async fn test_broadcast_chat_reaches_every_connection() {
        // テスト項目: N 接続への Chat 配信は N 件で、全て同じ sessionId / name / message
        // given (前提条件):
        let (broadcaster, registry) = create_test_broadcaster();
        let mut receivers = Vec::new();
        for (id, name) in [("a", "alice"), ("b", "bob"), ("c", "carol"), ("d", "")] {
            receivers.push(register_channel(&registry, id, name).await);
        }
        let event = Event::chat("a".into(), DisplayName::new("alice"), "hello");

        // when (操作):
        let report = broadcaster.broadcast(&event).await;

        // then (期待する結果):
        assert_eq!(
            report,
            BroadcastReport {
                targeted: 4,
                delivered: 4,
                failed: 0
            }
        );
        for rx in receivers.iter_mut() {
            let frame = next_json(rx);
            assert_eq!(frame["sessionId"], "a");
            assert_eq!(frame["name"], "alice");
            assert_eq!(frame["message"], " hello");
            assert!(rx.try_recv().is_err());
        }
    }

    #[tokio::test]
    async fn test_broadcast_partial_failure() {
        // テスト項目: 3 接続中 1 接続への配信が失敗しても残り 2 接続に届く
        // given (前提条件):
        let (broadcaster, registry) = create_test_broadcaster();
        let mut rx_a = register_channel(&registry, "a", "alice").await;

        let mut failing = MockOutboundHandle::new();
        failing
            .expect_send()
            .times(1)
            .returning(|_| Err(SendError::ChannelClosed("b".to_string())));
        registry
            .add(connection_with("b", "bob", Arc::new(failing)))
            .await
            .unwrap();

        let mut rx_c = register_channel(&registry, "c", "carol").await;
        let event = Event::chat("c".into(), DisplayName::new("carol"), "still here?");

        // when (操作):
        let report = broadcaster.broadcast(&event).await;

        // then (期待する結果):
        assert_eq!(report.delivered, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(next_json(&mut rx_a)["message"], " still here?");
        assert_eq!(next_json(&mut rx_c)["message"], " still here?");
        // 失敗した接続もレジストリに残る
        assert_eq!(registry.size().await, 3);
    }

    #[tokio::test]
    async fn test_broadcast_renders_count_from_registry() {
        // テスト項目: count はイベント生成時の値ではなく描画時のレジストリサイズ
        // given (前提条件):
        let (broadcaster, registry) = create_test_broadcaster();
        let mut rx_a = register_channel(&registry, "a", "alice").await;
        let mut rx_b = register_channel(&registry, "b", "bob").await;
        let event = Event::joined("b".into(), DisplayName::new("bob"), 99);

        // when (操作):
        broadcaster.broadcast(&event).await;

        // then (期待する結果):
        assert_eq!(next_json(&mut rx_a)["count"], 2);
        assert_eq!(next_json(&mut rx_b)["count"], 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_broadcast_does_not_hold_registry_lock_while_sending() {
        // テスト項目: 送信処理の途中で別の接続の登録が完了する（配信がレジストリをロックしない）
        // given (前提条件):
        let (broadcaster, registry) = create_test_broadcaster();
        let broadcaster = Arc::new(broadcaster);
        let joined_during_send = Arc::new(AtomicBool::new(false));

        let mut slow = MockOutboundHandle::new();
        {
            let registry = registry.clone();
            let joined_during_send = joined_during_send.clone();
            let handle = tokio::runtime::Handle::current();
            slow.expect_send().times(1).returning(move |_| {
                let late = connection_with("late", "late", Arc::new(MockOutboundHandle::new()));
                let result = tokio::task::block_in_place(|| {
                    handle.block_on(tokio::time::timeout(
                        Duration::from_secs(1),
                        registry.add(late),
                    ))
                });
                joined_during_send.store(matches!(result, Ok(Ok(()))), Ordering::SeqCst);
                Ok(())
            });
        }
        registry
            .add(connection_with("slow", "slow", Arc::new(slow)))
            .await
            .unwrap();
        let event = Event::chat("slow".into(), DisplayName::new("slow"), "hi");

        // when (操作):
        let report = tokio::spawn({
            let broadcaster = broadcaster.clone();
            async move { broadcaster.broadcast(&event).await }
        })
        .await
        .unwrap();

        // then (期待する結果):
        assert!(joined_during_send.load(Ordering::SeqCst));
        // スナップショットは新規参加より前に取られている
        assert_eq!(report.targeted, 1);
        assert_eq!(report.delivered, 1);
        assert_eq!(registry.size().await, 2);
    }

    #[tokio::test]
    async fn test_broadcast_with_no_connections() {
        // テスト項目: 接続がない場合は何も配信しない
        // given (前提条件):
        let (broadcaster, _registry) = create_test_broadcaster();
        let event = Event::left("gone".into(), DisplayName::new("ghost"), 0);

        // when (操作):
        let report = broadcaster.broadcast(&event).await;

        // then (期待する結果):
        assert_eq!(report, BroadcastReport::default());
    }

    #[tokio::test]
    async fn test_push_to_single_connection() {
        // テスト項目: push_to は指定した接続だけに配信する
        // given (前提条件):
        let (broadcaster, registry) = create_test_broadcaster();
        let mut rx_a = register_channel(&registry, "a", "alice").await;
        let mut rx_b = register_channel(&registry, "b", "bob").await;
        let target = registry.get(&"b".into()).await.unwrap();

        // when (操作):
        let result = broadcaster
            .push_to(&target, &Event::welcome("b".into()))
            .await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(next_json(&mut rx_b)["message"], "Your session details");
        assert!(rx_a.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_push_to_failure_is_returned() {
        // テスト項目: push_to の失敗は SendError として呼び出し側に返る
        // given (前提条件):
        let (broadcaster, _registry) = create_test_broadcaster();
        let (outbound, rx) = WebSocketOutbound::channel("a".into());
        drop(rx);
        let target = connection_with("a", "alice", Arc::new(outbound));

        // when (操作):
        let result = broadcaster
            .push_to(&target, &Event::welcome("a".into()))
            .await;

        // then (期待する結果):
        assert_eq!(result, Err(SendError::ChannelClosed("a".to_string())));
    }
}
