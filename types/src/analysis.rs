//! Pattern and rarity report types.
//!
//! These are derived values, recomputed on every analysis call and never stored.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::DigitString;

/// Kind of local structure found in a digit window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    /// Two equal adjacent digits.
    Repeat,
    /// Three consecutive digits each one greater than the last.
    Ascending,
    /// Three consecutive digits each one less than the last.
    Descending,
}

impl PatternKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            PatternKind::Repeat => "repeat",
            PatternKind::Ascending => "ascending",
            PatternKind::Descending => "descending",
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A match inside a window.
///
/// `value` holds the matched digit for a repeat and the three matched digits
/// for a triplet. `offset` is zero-based in the window with any decimal point
/// removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    #[serde(rename = "type")]
    pub kind: PatternKind,
    pub value: DigitString,
    pub offset: usize,
}

/// Coarse heuristic label derived from repetition pressure.
///
/// Ordered from least to most unusual.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum RarityLabel {
    #[default]
    Common,
    Rare,
    Epic,
    Legendary,
}

impl RarityLabel {
    /// Classify by `length - distinct_digits`.
    #[must_use]
    pub const fn from_repetition(repetition: usize) -> Self {
        match repetition {
            0..=1 => RarityLabel::Common,
            2 => RarityLabel::Rare,
            3 => RarityLabel::Epic,
            _ => RarityLabel::Legendary,
        }
    }

    /// Points awarded toward an identity score.
    #[must_use]
    pub const fn points(self) -> u64 {
        match self {
            RarityLabel::Common => 100,
            RarityLabel::Rare => 250,
            RarityLabel::Epic => 500,
            RarityLabel::Legendary => 1000,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            RarityLabel::Common => "Common",
            RarityLabel::Rare => "Rare",
            RarityLabel::Epic => "Epic",
            RarityLabel::Legendary => "Legendary",
        }
    }
}

impl fmt::Display for RarityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Simple,
    Complex,
}

impl Complexity {
    pub const SIMPLE_MAX_LEN: usize = 5;

    #[must_use]
    pub const fn from_length(length: usize) -> Self {
        if length > Self::SIMPLE_MAX_LEN {
            Complexity::Complex
        } else {
            Complexity::Simple
        }
    }
}

/// Full analysis of one window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceAnalysis {
    pub patterns: Vec<Pattern>,
    pub rarity: RarityLabel,
    pub unique_digits: usize,
    pub length: usize,
    /// Heuristic significance in `0..=10`.
    pub significance: u8,
    pub complexity: Complexity,
    /// Whether the window contains the digits `314`.
    pub pi_related: bool,
}

impl SequenceAnalysis {
    /// `100` per pattern plus the rarity's points.
    #[must_use]
    pub fn score(&self) -> u64 {
        self.patterns.len() as u64 * 100 + self.rarity.points()
    }

    pub fn patterns_of(&self, kind: PatternKind) -> impl Iterator<Item = &Pattern> {
        self.patterns.iter().filter(move |p| p.kind == kind)
    }
}
