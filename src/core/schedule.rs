//! Poll continuation and backoff policy.
//!
//! A job is only worth polling while its execution sits in one of the two
//! non-terminal statuses. The interval between polls grows with the total
//! elapsed wait time so long-running jobs don't hammer the backend.

use std::time::Duration;

/// Whether polling should continue for the given execution status.
///
/// The match is exact and case-sensitive; an absent status counts as terminal.
pub fn should_continue(status: Option<&str>) -> bool {
    matches!(status, Some("Not Started") | Some("In Progress"))
}

/// Next poll interval given time elapsed since the first scheduling decision.
///
/// Thresholds are strict: exactly 300/1800/3600 seconds of elapsed time still
/// fall into the lower bucket.
pub fn next_delay(elapsed: Duration) -> Duration {
    let elapsed = elapsed.as_secs_f64();

    let secs = if elapsed > 3600.0 {
        60
    } else if elapsed > 1800.0 {
        30
    } else if elapsed > 300.0 {
        10
    } else {
        5
    };

    Duration::from_secs(secs)
}
