//! # Single Retry
//!
//! A `backoff` policy that allows exactly one retry after a fixed delay.
//!
//! ```text
//!   attempt 1 ──✗──► sleep(delay) ──► attempt 2 ──✗──► give up
//!       │                                  │
//!       ✓                                  ✓
//!       ▼                                  ▼
//!      Ok                                 Ok
//! ```

use std::fmt::Display;
use std::time::Duration;

use backoff::backoff::Backoff;
use tracing::warn;

/// Backoff that yields one fixed delay, then stops.
#[derive(Debug, Clone)]
pub struct SingleRetry {
    delay: Duration,
    spent: bool,
}

impl SingleRetry {
    pub fn new(delay: Duration) -> Self {
        SingleRetry { delay, spent: false }
    }
}

impl Backoff for SingleRetry {
    fn reset(&mut self) {
        self.spent = false;
    }

    fn next_backoff(&mut self) -> Option<Duration> {
        if self.spent {
            None
        } else {
            self.spent = true;
            Some(self.delay)
        }
    }
}

/// Runs `op`, and once more after `delay` if the first attempt fails.
///
/// Returns the last error when both attempts fail.
pub fn retry_once<T, E, F>(delay: Duration, mut op: F) -> Result<T, E>
where
    F: FnMut() -> Result<T, E>,
    E: Display,
{
    let notify = |err: E, wait: Duration| {
        warn!(error = %err, retry_in_ms = wait.as_millis() as u64, "Attempt failed, retrying once");
    };

    backoff::retry_notify(
        SingleRetry::new(delay),
        || op().map_err(backoff::Error::transient),
        notify,
    )
    .map_err(|err| match err {
        backoff::Error::Permanent(e) => e,
        backoff::Error::Transient { err, .. } => err,
    })
}
