//! Server state shared by all handlers.

use std::sync::Arc;

use crate::{domain::ConnectionRegistry, usecase::SessionLifecycleController};

/// Shared application state
pub struct AppState {
    /// 接続のライフサイクル（接続・受信・切断）
    pub lifecycle: Arc<SessionLifecycleController>,
    /// 参加者一覧 API 用（読み取りのみ）
    pub registry: Arc<dyn ConnectionRegistry>,
}
