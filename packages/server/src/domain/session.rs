//! Session state machine
//!
//! 接続ごとの状態遷移: `Connecting → Open → Closed`（終端）

/// Lifecycle state of one connection as seen by the transport task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Connecting,
    Open,
    Closed,
}

impl SessionState {
    /// Transition after the connection has been registered and announced.
    ///
    /// Only `Connecting` can open; any other state is returned unchanged.
    pub fn open(self) -> Self {
        match self {
            Self::Connecting => Self::Open,
            other => other,
        }
    }

    /// Transition on close. `Closed` is terminal.
    pub fn close(self) -> Self {
        Self::Closed
    }

    /// Inbound frames are only processed while `Open`.
    pub fn accepts_frames(self) -> bool {
        self == Self::Open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_lifecycle() {
        // テスト項目: Connecting → Open → Closed の順に遷移する
        // given (前提条件):
        let state = SessionState::Connecting;
        assert!(!state.accepts_frames());

        // when (操作):
        let opened = state.open();
        let closed = opened.close();

        // then (期待する結果):
        assert_eq!(opened, SessionState::Open);
        assert!(opened.accepts_frames());
        assert_eq!(closed, SessionState::Closed);
        assert!(!closed.accepts_frames());
    }

    #[test]
    fn test_closed_is_terminal() {
        // テスト項目: Closed から Open には戻らない
        // given (前提条件):
        let state = SessionState::Connecting.close();

        // when (操作):
        let reopened = state.open();

        // then (期待する結果):
        assert_eq!(reopened, SessionState::Closed);
    }
}
