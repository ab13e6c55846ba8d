//! Wall-clock helper for collaborators.
//!
//! The core itself never reads the clock: every time-sensitive entry point
//! takes an explicit `now_ms`, which keeps scheduling deterministic under
//! test. Collaborators driving the core in real time use this.

use chrono::Utc;

/// Current time as epoch milliseconds.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
