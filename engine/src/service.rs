//! Query façade over the digit tape, the window cache and the analyzer.
//!
//! Each shared component has its own lock: the tape (and the generator inside
//! it) sits behind a `Mutex` because advancing it is inherently sequential,
//! and the cache sits behind an `RwLock` so concurrent readers do not block
//! each other. Neither lock is held while the other is taken.

use std::num::NonZeroU64;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError, RwLock};

use chrono::Utc;
use serde::Serialize;
use tokio::task;

use pidigits_core::{
    CacheStats, CancellationToken, Clock, Deadline, SequenceCache, SystemClock, analyze,
    parse_window,
};
use pidigits_types::{
    DigitString, EngineSettings, QueryError, RangeViolation, SequenceAnalysis, SequenceRange,
};

use crate::identity::{IDENTITY_LENGTH, PiDentity, position_from_seed};
use crate::tape::DigitTape;

/// Search window used by [`PiService::validate_sequence`].
pub const VALIDATION_SEARCH_LIMIT: u64 = 1000;

/// Cache hit/miss counters since construction or the last reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct QueryStats {
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub materialized: u64,
}

#[derive(Debug)]
pub struct PiService<C: Clock = SystemClock> {
    settings: EngineSettings,
    tape: Mutex<DigitTape>,
    cache: RwLock<SequenceCache<C>>,
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
}

impl PiService<SystemClock> {
    #[must_use]
    pub fn new(settings: EngineSettings) -> Self {
        Self::with_clock(settings, SystemClock)
    }

    /// Build from `~/.pidigits/config.toml` and `PIDIGITS_*` overrides.
    #[must_use]
    pub fn from_config() -> Self {
        Self::new(pidigits_config::load_settings())
    }
}

impl Default for PiService<SystemClock> {
    fn default() -> Self {
        Self::new(EngineSettings::default())
    }
}

impl<C: Clock> PiService<C> {
    #[must_use]
    pub fn with_clock(settings: EngineSettings, clock: C) -> Self {
        let tape = DigitTape::new(settings.refill_batch());
        let cache = SequenceCache::with_clock(settings.cache_ttl(), clock);
        Self {
            settings,
            tape: Mutex::new(tape),
            cache: RwLock::new(cache),
            cache_hits: AtomicU64::new(0),
            cache_misses: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    fn tape(&self) -> MutexGuard<'_, DigitTape> {
        self.tape.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Validate shape, per-request length and the position ceiling.
    pub fn validate_range(&self, start: i64, length: i64) -> Result<SequenceRange, QueryError> {
        let range = SequenceRange::new(start, length)?;
        if range.length() > self.settings.max_request_length() {
            return Err(QueryError::InvalidRange {
                start,
                length,
                reason: RangeViolation::LengthAboveLimit,
            });
        }
        self.check_ceiling(range.end())?;
        Ok(range)
    }

    fn check_ceiling(&self, end: u64) -> Result<(), QueryError> {
        let ceiling = self.settings.max_position();
        if end > ceiling {
            return Err(QueryError::GeneratorExhausted {
                requested_end: end,
                ceiling,
            });
        }
        Ok(())
    }

    /// Digits `[start, start + length)` of pi, position 0 being the `3`.
    pub fn get_sequence(&self, start: i64, length: i64) -> Result<DigitString, QueryError> {
        self.get_sequence_with(start, length, &CancellationToken::new())
    }

    /// As [`get_sequence`](Self::get_sequence), abandoning the request between
    /// generator refills once `token` is cancelled.
    pub fn get_sequence_with(
        &self,
        start: i64,
        length: i64,
        token: &CancellationToken,
    ) -> Result<DigitString, QueryError> {
        let range = self.validate_range(start, length)?;
        self.fetch(range, token)
    }

    /// Serve an already validated window, cache first.
    fn fetch(
        &self,
        range: SequenceRange,
        token: &CancellationToken,
    ) -> Result<DigitString, QueryError> {
        if let Some(hit) = self.cached(range) {
            return Ok(hit);
        }

        let deadline = Deadline::start(self.settings.request_timeout());
        let digits = {
            let mut tape = self.tape();
            tape.extend_to(range.end(), &deadline, token)?;
            tape.require_window(range)?
        };
        self.store(range, digits.clone());
        Ok(digits)
    }

    /// Async variant that releases the generator lock and yields to the
    /// runtime after every refill.
    pub async fn get_sequence_async(
        &self,
        start: i64,
        length: i64,
        token: &CancellationToken,
    ) -> Result<DigitString, QueryError> {
        let range = self.validate_range(start, length)?;
        if let Some(hit) = self.cached(range) {
            return Ok(hit);
        }

        let deadline = Deadline::start(self.settings.request_timeout());
        let mut produced = 0;
        loop {
            {
                let mut tape = self.tape();
                if tape.covers(range.end()) {
                    break;
                }
                deadline.check(token, produced)?;
                produced += tape.advance_toward(range.end())?;
            }
            task::yield_now().await;
        }
        tracing::debug!(%range, produced, "materialized window asynchronously");

        let digits = self.tape().require_window(range)?;
        self.store(range, digits.clone());
        Ok(digits)
    }

    fn cached(&self, range: SequenceRange) -> Option<DigitString> {
        let hit = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(range);
        if hit.is_some() {
            self.cache_hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.cache_misses.fetch_add(1, Ordering::Relaxed);
        }
        hit
    }

    fn store(&self, range: SequenceRange, digits: DigitString) {
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .put(range, digits);
    }

    /// Patterns, rarity and the derived heuristics for `sequence`.
    pub fn analyze_sequence(&self, sequence: &str) -> Result<SequenceAnalysis, QueryError> {
        analyze(sequence)
    }

    /// Position of the first occurrence of `needle` within digits
    /// `[0, search_limit)`. A single decimal point in `needle` is ignored.
    pub fn locate_sequence(
        &self,
        needle: &str,
        search_limit: u64,
    ) -> Result<Option<u64>, QueryError> {
        let needle = parse_window(needle)?;
        if needle.is_empty() {
            return Ok(Some(0));
        }
        self.check_ceiling(search_limit)?;

        let deadline = Deadline::start(self.settings.request_timeout());
        let mut tape = self.tape();
        tape.extend_to(search_limit, &deadline, &CancellationToken::new())?;
        let position = tape
            .prefix(search_limit)
            .windows(needle.len())
            .position(|window| window == needle.as_slice())
            .map(|p| p as u64);
        tracing::debug!(needle_len = needle.len(), search_limit, ?position, "located sequence");
        Ok(position)
    }

    /// Whether `needle` occurs within the first thousand digits.
    pub fn validate_sequence(&self, needle: &str) -> Result<bool, QueryError> {
        let limit = VALIDATION_SEARCH_LIMIT.min(self.settings.max_position());
        Ok(self.locate_sequence(needle, limit)?.is_some())
    }

    /// Fetch and score the identity window selected by `seed`.
    ///
    /// Pass `rand::random()` for a fresh identity; a fixed seed always selects
    /// the same window.
    pub fn generate_identity(&self, seed: u64) -> Result<PiDentity, QueryError> {
        let length = NonZeroU64::new(IDENTITY_LENGTH.min(self.settings.max_request_length()))
            .unwrap_or(NonZeroU64::MIN);
        let position = position_from_seed(seed, length.get(), self.settings.max_position());
        let range = SequenceRange::from_parts(position, length);
        self.check_ceiling(range.end())?;
        let sequence = self.fetch(range, &CancellationToken::new())?;
        let analysis = analyze(sequence.as_str())?;
        let score = analysis.score();
        tracing::debug!(position, %sequence, rarity = %analysis.rarity, score, "generated identity");
        Ok(PiDentity {
            sequence,
            position,
            analysis,
            score,
            created_at: Utc::now(),
        })
    }

    /// Evict expired windows now. Returns how many were removed.
    pub fn clean_cache(&self) -> usize {
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clean()
    }

    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .stats()
    }

    #[must_use]
    pub fn query_stats(&self) -> QueryStats {
        QueryStats {
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.cache_misses.load(Ordering::Relaxed),
            materialized: self.tape().len(),
        }
    }

    /// Drop every materialized digit and cached window; the next query starts
    /// again from digit zero.
    pub fn reset(&self) {
        *self.tape() = DigitTape::new(self.settings.refill_batch());
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.cache_hits.store(0, Ordering::Relaxed);
        self.cache_misses.store(0, Ordering::Relaxed);
        tracing::debug!("engine reset");
    }
}
