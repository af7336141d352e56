use std::time::Duration;

use thiserror::Error;

use crate::RangeViolation;

/// A broken invariant in the arbitrary-precision arithmetic.
///
/// Reaching one of these means the digit transition is wrong; it is never
/// caused by caller input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArithmeticError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("subtraction would produce a negative value")]
    NegativeResult,
    #[error("transition coefficient overflowed at iteration {iteration}")]
    CoefficientOverflow { iteration: u64 },
    #[error("extracted value is not a decimal digit")]
    NonDecimalDigit,
}

/// A broken engine invariant, never caused by caller input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InternalError {
    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),
    #[error("tape holds {materialized} digits but {requested_end} were required")]
    TapeShortfall { requested_end: u64, materialized: u64 },
}

/// Errors surfaced by digit queries and sequence analysis.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("invalid range (start {start}, length {length}): {reason}")]
    InvalidRange {
        start: i64,
        length: i64,
        reason: RangeViolation,
    },
    #[error("position {requested_end} is beyond the configured ceiling of {ceiling} digits")]
    GeneratorExhausted { requested_end: u64, ceiling: u64 },
    #[error("time budget exhausted after producing {produced} digits in {elapsed:?}")]
    ResourceExhaustion { produced: u64, elapsed: Duration },
    #[error("request cancelled")]
    Cancelled,
    #[error("invalid character {found:?} at offset {offset}")]
    InvalidSequence { offset: usize, found: char },
    #[error("internal error: {0}")]
    Internal(#[from] InternalError),
}

impl From<ArithmeticError> for QueryError {
    fn from(error: ArithmeticError) -> Self {
        QueryError::Internal(InternalError::Arithmetic(error))
    }
}

impl QueryError {
    /// Whether the caller could succeed by asking for a different window.
    #[must_use]
    pub const fn is_caller_error(&self) -> bool {
        matches!(
            self,
            QueryError::InvalidRange { .. }
                | QueryError::GeneratorExhausted { .. }
                | QueryError::InvalidSequence { .. }
        )
    }
}
