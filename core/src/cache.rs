//! Time-to-live cache of materialized digit windows.
//!
//! Keys are [`SequenceRange`] tuples. Entries are immutable once inserted;
//! eviction removes them and never rewrites them. Reads never evict, so a
//! shared read lock is enough for `get`. Expired entries are swept before each
//! `put` or by an explicit [`SequenceCache::evict_expired`].

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use serde::Serialize;

use pidigits_types::{DigitString, SequenceRange};

/// Source of "now" for expiry decisions.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<Instant>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: Arc::new(Mutex::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    digits: DigitString,
    created: Instant,
}

impl CacheEntry {
    fn is_fresh(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.created) < ttl
    }
}

/// Snapshot of cache contents for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    /// Keys in ascending `(start, length)` order.
    pub keys: Vec<SequenceRange>,
}

#[derive(Debug)]
pub struct SequenceCache<C: Clock = SystemClock> {
    entries: HashMap<SequenceRange, CacheEntry>,
    ttl: Duration,
    clock: C,
}

impl SequenceCache<SystemClock> {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, SystemClock)
    }
}

impl<C: Clock> SequenceCache<C> {
    #[must_use]
    pub fn with_clock(ttl: Duration, clock: C) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
            clock,
        }
    }

    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    #[must_use]
    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    /// The cached window, if present and younger than the TTL.
    #[must_use]
    pub fn get(&self, range: SequenceRange) -> Option<DigitString> {
        let now = self.clock.now();
        let hit = self
            .entries
            .get(&range)
            .filter(|entry| entry.is_fresh(now, self.ttl))
            .map(|entry| entry.digits.clone());
        tracing::debug!(%range, hit = hit.is_some(), "sequence cache lookup");
        hit
    }

    /// Insert or overwrite `range`, stamping it with the current time.
    pub fn put(&mut self, range: SequenceRange, digits: DigitString) {
        debug_assert_eq!(digits.len() as u64, range.length());
        let now = self.clock.now();
        self.evict_expired(now);
        self.entries.insert(
            range,
            CacheEntry {
                digits,
                created: now,
            },
        );
    }

    /// Remove every entry at least `ttl` old as of `now`. Returns how many
    /// were removed.
    pub fn evict_expired(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        let ttl = self.ttl;
        self.entries.retain(|_, entry| entry.is_fresh(now, ttl));
        let evicted = before - self.entries.len();
        if evicted > 0 {
            tracing::debug!(evicted, remaining = self.entries.len(), "evicted expired windows");
        }
        evicted
    }

    /// Sweep using the cache's own clock.
    pub fn clean(&mut self) -> usize {
        let now = self.clock.now();
        self.evict_expired(now)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        let mut keys: Vec<SequenceRange> = self.entries.keys().copied().collect();
        keys.sort_unstable();
        CacheStats {
            entries: keys.len(),
            keys,
        }
    }
}
