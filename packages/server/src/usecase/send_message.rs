//! UseCase: メッセージ送信処理
//!
//! 受信したフレームをデコードし、送信者の表示名を付けて全接続に Chat をブロードキャストします。
//! 不正なフレームや切断済みの接続からのフレームは破棄され、何も配信されません。

use std::sync::Arc;

use crate::domain::{
    BroadcastReport, ConnectionId, ConnectionRegistry, Event, MessageCodec, MessagePusher,
};

use super::error::SendMessageError;

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
    codec: Arc<dyn MessageCodec>,
}

impl SendMessageUseCase {
    pub fn new(
        registry: Arc<dyn ConnectionRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
        codec: Arc<dyn MessageCodec>,
    ) -> Self {
        Self {
            registry,
            message_pusher,
            codec,
        }
    }

    /// メッセージ送信を実行
    ///
    /// # Returns
    ///
    /// * `Ok(BroadcastReport)` - ブロードキャスト結果
    /// * `Err(SendMessageError::SessionClosed)` - 送信者が登録されていない
    /// * `Err(SendMessageError::Decode)` - フレームが不正
    pub async fn execute(
        &self,
        sender_id: &ConnectionId,
        raw_text: &str,
    ) -> Result<BroadcastReport, SendMessageError> {
        if self.registry.get(sender_id).await.is_none() {
            return Err(SendMessageError::SessionClosed(sender_id.to_string()));
        }

        let text = self.codec.decode_inbound(raw_text)?;
        let name = self.registry.lookup_name(sender_id).await;
        let chat = Event::chat(sender_id.clone(), name, text);

        Ok(self.message_pusher.broadcast(&chat).await)
    }
}
