//! Unbounded non-negative integers for the spigot state.
//!
//! A thin wrapper over [`BigUint`] that exposes only the operations the digit
//! transition needs and turns the operations that would panic (division by
//! zero, negative differences) into [`ArithmeticError`]s.

use std::cmp::Ordering;
use std::fmt;

use num_bigint::BigUint;

use pidigits_types::ArithmeticError;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Natural(BigUint);

impl Natural {
    #[must_use]
    pub fn zero() -> Self {
        Self(BigUint::default())
    }

    #[must_use]
    pub fn from_u64(value: u64) -> Self {
        Self(BigUint::from(value))
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.bits() == 0
    }

    /// Number of significant bits; grows with every spigot step.
    #[must_use]
    pub fn bits(&self) -> u64 {
        self.0.bits()
    }

    /// The value as a `u64`, if it fits.
    #[must_use]
    pub fn to_u64(&self) -> Option<u64> {
        match self.0.to_u64_digits().as_slice() {
            [] => Some(0),
            [value] => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn add(&self, other: &Natural) -> Natural {
        Natural(&self.0 + &other.0)
    }

    #[must_use]
    pub fn multiply(&self, other: &Natural) -> Natural {
        Natural(&self.0 * &other.0)
    }

    #[must_use]
    pub fn multiply_small(&self, k: u64) -> Natural {
        Natural(&self.0 * k)
    }

    pub fn checked_sub(&self, other: &Natural) -> Result<Natural, ArithmeticError> {
        match self.0.cmp(&other.0) {
            Ordering::Less => Err(ArithmeticError::NegativeResult),
            Ordering::Equal => Ok(Natural::zero()),
            Ordering::Greater => Ok(Natural(&self.0 - &other.0)),
        }
    }

    /// `floor(self / divisor)`.
    pub fn exact_divide_floor(&self, divisor: &Natural) -> Result<Natural, ArithmeticError> {
        if divisor.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }
        Ok(Natural(&self.0 / &divisor.0))
    }
}

impl From<u64> for Natural {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl fmt::Display for Natural {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
