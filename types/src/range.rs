//! Validated digit windows.

use std::fmt;
use std::num::NonZeroU64;

use serde::{Deserialize, Serialize};

use crate::QueryError;

/// Why a requested window was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeViolation {
    NegativeStart,
    EmptyLength,
    NegativeLength,
    LengthAboveLimit,
}

impl fmt::Display for RangeViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            RangeViolation::NegativeStart => "start must not be negative",
            RangeViolation::EmptyLength => "length must be positive",
            RangeViolation::NegativeLength => "length must not be negative",
            RangeViolation::LengthAboveLimit => "length exceeds the per-request limit",
        };
        f.write_str(text)
    }
}

/// A window of digit positions `[start, start + length)`.
///
/// This is the cache key. It is compared and hashed as a tuple, so windows like
/// `(10, 5)` and `(1, 05)` can never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SequenceRange {
    start: u64,
    length: NonZeroU64,
}

impl SequenceRange {
    /// Validate caller-supplied signed arguments.
    ///
    /// Only shape is checked here; ceilings are enforced by the engine that
    /// owns the settings.
    pub fn new(start: i64, length: i64) -> Result<Self, QueryError> {
        let invalid = |reason| QueryError::InvalidRange {
            start,
            length,
            reason,
        };
        if start < 0 {
            return Err(invalid(RangeViolation::NegativeStart));
        }
        if length < 0 {
            return Err(invalid(RangeViolation::NegativeLength));
        }
        let length = NonZeroU64::new(length as u64).ok_or(invalid(RangeViolation::EmptyLength))?;
        // Two non-negative i64 values always sum within u64.
        Ok(Self {
            start: start as u64,
            length,
        })
    }

    #[must_use]
    pub const fn from_parts(start: u64, length: NonZeroU64) -> Self {
        Self { start, length }
    }

    #[must_use]
    pub const fn start(self) -> u64 {
        self.start
    }

    #[must_use]
    pub const fn length(self) -> u64 {
        self.length.get()
    }

    /// One past the last position in the window.
    #[must_use]
    pub const fn end(self) -> u64 {
        self.start.saturating_add(self.length.get())
    }

    #[must_use]
    pub const fn contains(self, position: u64) -> bool {
        position >= self.start && position < self.end()
    }
}

impl fmt::Display for SequenceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end())
    }
}
