//! Pattern and rarity analysis of digit windows.
//!
//! The heuristics here are intentionally coarse: rarity is a function of
//! `length - distinct_digits`, not of any probability model.

use pidigits_types::{
    Complexity, Digit, DigitString, Pattern, PatternKind, QueryError, RarityLabel,
    SequenceAnalysis,
};

const MAX_SIGNIFICANCE: usize = 10;
const PI_PREFIX: &[u8] = &[3, 1, 4];

/// Parse an analysis window, dropping at most one decimal point.
pub fn parse_window(sequence: &str) -> Result<Vec<Digit>, QueryError> {
    let mut digits = Vec::with_capacity(sequence.len());
    let mut seen_point = false;
    for (offset, found) in sequence.char_indices() {
        if found == '.' && !seen_point {
            seen_point = true;
            continue;
        }
        let digit = u8::try_from(found)
            .ok()
            .and_then(Digit::from_ascii)
            .ok_or(QueryError::InvalidSequence { offset, found })?;
        digits.push(digit);
    }
    Ok(digits)
}

/// Repeats first, then triplets in offset order.
///
/// Every adjacent equal pair is its own repeat, so `"111"` yields two repeats.
#[must_use]
pub fn find_patterns(digits: &[Digit]) -> Vec<Pattern> {
    let mut patterns = Vec::new();

    for (offset, pair) in digits.windows(2).enumerate() {
        if pair[0] == pair[1] {
            patterns.push(Pattern {
                kind: PatternKind::Repeat,
                value: DigitString::from_digits(&pair[..1]),
                offset,
            });
        }
    }

    for (offset, triple) in digits.windows(3).enumerate() {
        let [a, b, c] = [triple[0], triple[1], triple[2]].map(|d| i16::from(d.value()));
        let kind = if b == a + 1 && c == a + 2 {
            PatternKind::Ascending
        } else if b == a - 1 && c == a - 2 {
            PatternKind::Descending
        } else {
            continue;
        };
        patterns.push(Pattern {
            kind,
            value: DigitString::from_digits(triple),
            offset,
        });
    }

    patterns
}

#[must_use]
pub fn distinct_digits(digits: &[Digit]) -> usize {
    let mut seen = [false; 10];
    for digit in digits {
        seen[usize::from(digit.value())] = true;
    }
    seen.iter().filter(|&&s| s).count()
}

#[must_use]
pub fn calculate_rarity(digits: &[Digit]) -> RarityLabel {
    RarityLabel::from_repetition(digits.len() - distinct_digits(digits))
}

/// `min(floor((2R + U) / 3), 10)` where `U` is the distinct digit count and
/// `R = length - U`.
#[must_use]
pub fn significance(digits: &[Digit]) -> u8 {
    let unique = distinct_digits(digits);
    let repetition = digits.len() - unique;
    ((2 * repetition + unique) / 3).min(MAX_SIGNIFICANCE) as u8
}

fn contains_pi_prefix(digits: &[Digit]) -> bool {
    digits.windows(PI_PREFIX.len()).any(|w| {
        w.iter()
            .map(|d| d.value())
            .eq(PI_PREFIX.iter().copied())
    })
}

#[must_use]
pub fn analyze_digits(digits: &[Digit]) -> SequenceAnalysis {
    SequenceAnalysis {
        patterns: find_patterns(digits),
        rarity: calculate_rarity(digits),
        unique_digits: distinct_digits(digits),
        length: digits.len(),
        significance: significance(digits),
        complexity: Complexity::from_length(digits.len()),
        pi_related: contains_pi_prefix(digits),
    }
}

/// Parse and analyze a window such as `"3.14159"` or `"26535"`.
pub fn analyze(sequence: &str) -> Result<SequenceAnalysis, QueryError> {
    let digits = parse_window(sequence)?;
    Ok(analyze_digits(&digits))
}
