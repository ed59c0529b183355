//! Time utilities with a clock abstraction so that connection timestamps are testable.

use chrono::{DateTime, FixedOffset, Offset, Utc};

/// JST is UTC+9.
const JST_OFFSET_SECS: i32 = 9 * 3600;

fn jst() -> FixedOffset {
    // 9 hours is always within the valid offset range.
    FixedOffset::east_opt(JST_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// Source of "now" for components that stamp connections.
pub trait Clock: Send + Sync {
    /// Current Unix timestamp in milliseconds
    fn now_jst_millis(&self) -> i64;
}

/// Clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_jst_millis(&self) -> i64 {
        get_jst_timestamp()
    }
}

/// Clock that always returns the same instant (for tests).
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: i64,
}

impl FixedClock {
    pub fn new(fixed_time_millis: i64) -> Self {
        Self {
            fixed_time: fixed_time_millis,
        }
    }
}

impl Clock for FixedClock {
    fn now_jst_millis(&self) -> i64 {
        self.fixed_time
    }
}

/// Get current Unix timestamp (milliseconds)
pub fn get_jst_timestamp() -> i64 {
    let now_jst: DateTime<FixedOffset> = Utc::now().with_timezone(&jst());
    now_jst.timestamp_millis()
}

/// Convert a Unix timestamp (milliseconds) to RFC 3339 in JST.
///
/// Out-of-range timestamps are clamped to the Unix epoch.
pub fn timestamp_to_jst_rfc3339(timestamp_millis: i64) -> String {
    let dt = DateTime::from_timestamp_millis(timestamp_millis).unwrap_or_else(|| {
        tracing::warn!(
            "Timestamp {} ms is out of range; clamping to the Unix epoch",
            timestamp_millis
        );
        DateTime::default()
    });
    dt.with_timezone(&jst()).to_rfc3339()
}
