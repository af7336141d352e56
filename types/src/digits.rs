//! Decimal digit types.
//!
//! A [`Digit`] is a single value in `0..=9`. A [`DigitString`] is a string made
//! only of ASCII decimal digits; existence of the value proves that invariant.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::QueryError;

/// A single decimal digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Digit(u8);

impl Digit {
    pub const ZERO: Digit = Digit(0);
    /// The integer part of pi, emitted at position 0.
    pub const THREE: Digit = Digit(3);

    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value <= 9 { Some(Self(value)) } else { None }
    }

    #[must_use]
    pub const fn from_ascii(byte: u8) -> Option<Self> {
        if byte.is_ascii_digit() {
            Some(Self(byte - b'0'))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn as_ascii(self) -> u8 {
        b'0' + self.0
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        self.as_ascii() as char
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{0} is not a decimal digit")]
pub struct DigitOutOfRange(pub u8);

impl TryFrom<u8> for Digit {
    type Error = DigitOutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(DigitOutOfRange(value))
    }
}

impl From<Digit> for u8 {
    fn from(digit: Digit) -> Self {
        digit.0
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A string of ASCII decimal digits with no point, sign or whitespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DigitString(String);

impl DigitString {
    /// Validate `value` as a plain digit string.
    ///
    /// The error carries the offset of the first offending character.
    pub fn parse(value: impl Into<String>) -> Result<Self, QueryError> {
        let value = value.into();
        if let Some((offset, found)) = value.char_indices().find(|(_, c)| !c.is_ascii_digit()) {
            return Err(QueryError::InvalidSequence { offset, found });
        }
        Ok(Self(value))
    }

    #[must_use]
    pub fn from_digits(digits: &[Digit]) -> Self {
        Self(digits.iter().map(|d| d.as_char()).collect())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn digits(&self) -> impl Iterator<Item = Digit> + '_ {
        // Every byte is an ASCII digit by construction.
        self.0.bytes().map(|b| Digit(b - b'0'))
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for DigitString {
    type Error = QueryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<&str> for DigitString {
    type Error = QueryError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<DigitString> for String {
    fn from(value: DigitString) -> Self {
        value.0
    }
}

impl AsRef<str> for DigitString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DigitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Render a window for display, inserting the decimal point after the
/// integer digit when the window starts at position 0.
///
/// This is presentation only; the engine never stores the point.
#[must_use]
pub fn format_with_decimal_point(start: u64, digits: &DigitString) -> String {
    if start != 0 || digits.is_empty() {
        return digits.as_str().to_string();
    }
    let (head, tail) = digits.as_str().split_at(1);
    if tail.is_empty() {
        head.to_string()
    } else {
        format!("{head}.{tail}")
    }
}
