//! InMemory Connection Registry 実装
//!
//! ドメイン層が定義する ConnectionRegistry trait の具体的な実装。
//! 1 つの Mutex で HashMap 全体を保護します（エントリ単位のロックは行わない）。
//! `snapshot()` は `Arc<Connection>` をコピーした時点でロックを解放するため、
//! 遅い送信が新規参加や退出をブロックすることはありません。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Connection, ConnectionId, ConnectionRegistry, DisplayName, RegistryError};

struct Entry {
    /// 登録順
    seq: u64,
    connection: Arc<Connection>,
}

#[derive(Default)]
struct Inner {
    connections: HashMap<ConnectionId, Entry>,
    next_seq: u64,
}

/// インメモリ接続レジストリ
#[derive(Default)]
pub struct InMemoryConnectionRegistry {
    inner: Mutex<Inner>,
}

impl InMemoryConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConnectionRegistry for InMemoryConnectionRegistry {
    async fn add(&self, connection: Arc<Connection>) -> Result<(), RegistryError> {
        let mut inner = self.inner.lock().await;
        if inner.connections.contains_key(connection.id()) {
            return Err(RegistryError::DuplicateId(connection.id().to_string()));
        }

        let seq = inner.next_seq;
        inner.next_seq += 1;
        let id = connection.id().clone();
        inner.connections.insert(id.clone(), Entry { seq, connection });
        tracing::debug!(
            "Connection '{}' registered ({} live)",
            id,
            inner.connections.len()
        );

        Ok(())
    }

    async fn remove(&self, id: &ConnectionId) -> Option<Arc<Connection>> {
        let mut inner = self.inner.lock().await;
        let removed = inner.connections.remove(id).map(|entry| entry.connection);
        if removed.is_some() {
            tracing::debug!(
                "Connection '{}' unregistered ({} live)",
                id,
                inner.connections.len()
            );
        }
        removed
    }

    async fn get(&self, id: &ConnectionId) -> Option<Arc<Connection>> {
        let inner = self.inner.lock().await;
        inner
            .connections
            .get(id)
            .map(|entry| Arc::clone(&entry.connection))
    }

    async fn snapshot(&self) -> Vec<Arc<Connection>> {
        let mut entries: Vec<(u64, Arc<Connection>)> = {
            let inner = self.inner.lock().await;
            inner
                .connections
                .values()
                .map(|entry| (entry.seq, Arc::clone(&entry.connection)))
                .collect()
        };

        entries.sort_by_key(|(seq, _)| *seq);
        entries.into_iter().map(|(_, connection)| connection).collect()
    }

    async fn size(&self) -> usize {
        self.inner.lock().await.connections.len()
    }

    async fn lookup_name(&self, id: &ConnectionId) -> DisplayName {
        let inner = self.inner.lock().await;
        inner
            .connections
            .get(id)
            .map(|entry| entry.connection.display_name().clone())
            .unwrap_or_default()
    }
}
