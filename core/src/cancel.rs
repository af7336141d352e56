//! Cooperative cancellation and time budgets for long digit runs.
//!
//! Both are polled once per generator refill, never mid-digit.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use pidigits_types::QueryError;

/// Shared flag a caller flips to abandon an in-flight request.
///
/// Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Wall-clock budget for one request.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    started: Instant,
    limit: Option<Duration>,
}

impl Deadline {
    #[must_use]
    pub fn start(limit: Option<Duration>) -> Self {
        Self {
            started: Instant::now(),
            limit,
        }
    }

    #[must_use]
    pub fn unbounded() -> Self {
        Self::start(None)
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.limit.is_some_and(|limit| self.elapsed() >= limit)
    }

    /// Check cancellation first, then the budget.
    ///
    /// `produced` is reported in the exhaustion error so callers can see how
    /// far the request got.
    pub fn check(&self, token: &CancellationToken, produced: u64) -> Result<(), QueryError> {
        if token.is_cancelled() {
            tracing::warn!(produced, "digit request cancelled");
            return Err(QueryError::Cancelled);
        }
        if self.is_expired() {
            let elapsed = self.elapsed();
            tracing::warn!(produced, ?elapsed, "digit request exceeded its time budget");
            return Err(QueryError::ResourceExhaustion { produced, elapsed });
        }
        Ok(())
    }
}
