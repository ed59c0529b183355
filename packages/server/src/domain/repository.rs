//! ConnectionRegistry trait 定義
//!
//! ライブな接続の集合を管理するインターフェース。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use std::sync::Arc;

use async_trait::async_trait;

use super::{Connection, ConnectionId, DisplayName, RegistryError};

/// Shared set of live connections. Single source of truth for membership and count.
#[async_trait]
pub trait ConnectionRegistry: Send + Sync {
    /// 接続を登録。同じ ID が既に存在する場合は `DuplicateId`
    async fn add(&self, connection: Arc<Connection>) -> Result<(), RegistryError>;

    /// 接続を削除して返す。存在しない ID の場合は `None`（エラーではない）
    async fn remove(&self, id: &ConnectionId) -> Option<Arc<Connection>>;

    /// 登録中の接続を取得
    async fn get(&self, id: &ConnectionId) -> Option<Arc<Connection>>;

    /// Point-in-time copy of all connections in registration order.
    ///
    /// The registry lock is released before this returns.
    async fn snapshot(&self) -> Vec<Arc<Connection>>;

    /// 接続数
    async fn size(&self) -> usize;

    /// 表示名を取得。存在しない場合は空の名前
    async fn lookup_name(&self, id: &ConnectionId) -> DisplayName;
}
