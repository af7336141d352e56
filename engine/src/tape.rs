//! Materialized digit prefix plus the generator positioned at its end.
//!
//! The spigot is forward-only, so serving `[start, start + length)` needs every
//! digit before `start`. The tape keeps all of them; a window that lies inside
//! the tape is a slice, and a window past the end advances the generator just
//! far enough.

use std::num::NonZeroUsize;

use pidigits_core::{CancellationToken, Deadline, Spigot};
use pidigits_types::{Digit, DigitString, InternalError, QueryError, SequenceRange};

#[derive(Debug)]
pub struct DigitTape {
    spigot: Spigot,
    digits: Vec<Digit>,
}

impl DigitTape {
    #[must_use]
    pub fn new(batch: NonZeroUsize) -> Self {
        Self {
            spigot: Spigot::with_batch(batch),
            digits: Vec::new(),
        }
    }

    /// Number of digits materialized so far.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.digits.len() as u64
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    #[must_use]
    pub fn covers(&self, end: u64) -> bool {
        self.len() >= end
    }

    #[must_use]
    pub fn prefix(&self, end: u64) -> &[Digit] {
        let end = usize::try_from(end).unwrap_or(usize::MAX).min(self.digits.len());
        &self.digits[..end]
    }

    /// The digits of `range`, if already materialized.
    #[must_use]
    pub fn window(&self, range: SequenceRange) -> Option<DigitString> {
        if !self.covers(range.end()) {
            return None;
        }
        let start = usize::try_from(range.start()).ok()?;
        let end = usize::try_from(range.end()).ok()?;
        Some(DigitString::from_digits(&self.digits[start..end]))
    }

    /// As [`window`](Self::window), for callers that have already extended
    /// the tape past `range.end()`.
    pub fn require_window(&self, range: SequenceRange) -> Result<DigitString, QueryError> {
        self.window(range).ok_or(QueryError::Internal(InternalError::TapeShortfall {
            requested_end: range.end(),
            materialized: self.len(),
        }))
    }

    /// Run at most one generator refill toward `end`. Returns how many digits
    /// were appended.
    pub fn advance_toward(&mut self, end: u64) -> Result<u64, QueryError> {
        let missing = end.saturating_sub(self.len());
        let max = usize::try_from(missing).unwrap_or(usize::MAX);
        let appended = self.spigot.drain_into(&mut self.digits, max)?;
        Ok(appended as u64)
    }

    /// Advance until the tape covers `end`, polling `token` and `deadline`
    /// once per refill.
    pub fn extend_to(
        &mut self,
        end: u64,
        deadline: &Deadline,
        token: &CancellationToken,
    ) -> Result<u64, QueryError> {
        let mut produced = 0;
        if self.covers(end) {
            return Ok(produced);
        }
        while !self.covers(end) {
            deadline.check(token, produced)?;
            produced += self.advance_toward(end)?;
        }
        tracing::debug!(produced, materialized = self.len(), "tape extended");
        Ok(produced)
    }
}
