//! Pi-dentities: a random window of pi with its analysis and score.

use chrono::{DateTime, Utc};
use serde::Serialize;

use pidigits_types::{DigitString, SequenceAnalysis};

/// Default window length of an identity.
pub const IDENTITY_LENGTH: u64 = 15;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PiDentity {
    pub sequence: DigitString,
    pub position: u64,
    pub analysis: SequenceAnalysis,
    pub score: u64,
    pub created_at: DateTime<Utc>,
}

/// Map `seed` uniformly onto a start position whose window of `length`
/// still ends at or before `ceiling`.
#[must_use]
pub fn position_from_seed(seed: u64, length: u64, ceiling: u64) -> u64 {
    let span = ceiling.saturating_sub(length).saturating_add(1);
    seed % span
}
