//! Streaming spigot for the decimal digits of pi.
//!
//! The generator carries `(q, r, t, i)` between calls and never re-derives an
//! earlier digit. Each step emits one digit:
//!
//! ```text
//! u  = 3 (3i + 1)(3i + 2)
//! y  = floor((q (27i - 12) + 5r) / 5t)
//! q' = 10 q i (2i - 1)
//! r' = 10 u (q (5i - 2) + r - y t)
//! t' = t u
//! i' = i + 1
//! ```
//!
//! starting from `q = 1, r = 180, t = 60, i = 2`. The first emitted digit is
//! the integer part `3`; every following digit is a fractional digit.
//!
//! Digits are computed in batches into an internal buffer. The batch size only
//! amortizes loop overhead; it never changes emission order or values.

use std::collections::VecDeque;
use std::num::NonZeroUsize;

use pidigits_types::{ArithmeticError, Digit};

use crate::bigint::Natural;

pub const DEFAULT_BATCH: NonZeroUsize = NonZeroUsize::new(1000).unwrap();

/// Forward-only pi digit generator.
#[derive(Debug)]
pub struct Spigot {
    q: Natural,
    r: Natural,
    t: Natural,
    i: u64,
    buffer: VecDeque<Digit>,
    batch: NonZeroUsize,
    emitted: u64,
}

impl Default for Spigot {
    fn default() -> Self {
        Self::new()
    }
}

impl Spigot {
    #[must_use]
    pub fn new() -> Self {
        Self::with_batch(DEFAULT_BATCH)
    }

    #[must_use]
    pub fn with_batch(batch: NonZeroUsize) -> Self {
        Self {
            q: Natural::from_u64(1),
            r: Natural::from_u64(180),
            t: Natural::from_u64(60),
            i: 2,
            buffer: VecDeque::new(),
            batch,
            emitted: 0,
        }
    }

    /// Position of the next digit [`next_digit`](Self::next_digit) will return.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.emitted
    }

    #[must_use]
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn batch(&self) -> NonZeroUsize {
        self.batch
    }

    /// Emit the next digit, refilling the buffer if it is empty.
    pub fn next_digit(&mut self) -> Result<Digit, ArithmeticError> {
        if self.buffer.is_empty() {
            self.refill()?;
        }
        let digit = self
            .buffer
            .pop_front()
            .ok_or(ArithmeticError::NonDecimalDigit)?;
        self.emitted += 1;
        Ok(digit)
    }

    /// Move up to `max` buffered digits into `out`, refilling first if the
    /// buffer is empty. Returns how many digits were appended.
    ///
    /// Callers that need to check a deadline or cancellation between batches
    /// call this in a loop.
    pub fn drain_into(&mut self, out: &mut Vec<Digit>, max: usize) -> Result<usize, ArithmeticError> {
        if max == 0 {
            return Ok(0);
        }
        if self.buffer.is_empty() {
            self.refill()?;
        }
        let take = max.min(self.buffer.len());
        out.extend(self.buffer.drain(..take));
        self.emitted += take as u64;
        Ok(take)
    }

    /// Compute one batch of digits into the buffer.
    pub fn refill(&mut self) -> Result<usize, ArithmeticError> {
        let batch = self.batch.get();
        for _ in 0..batch {
            let digit = self.step()?;
            self.buffer.push_back(digit);
        }
        tracing::trace!(
            iteration = self.i,
            emitted = self.emitted,
            state_bits = self.t.bits(),
            "spigot refilled {batch} digits"
        );
        Ok(batch)
    }

    fn step(&mut self) -> Result<Digit, ArithmeticError> {
        let i = self.i;
        let overflow = ArithmeticError::CoefficientOverflow { iteration: i };
        let coefficient = |value: Option<u64>| value.ok_or(overflow);

        let three_i = i.checked_mul(3);
        let u = coefficient(
            three_i
                .and_then(|v| v.checked_add(1))
                .zip(three_i.and_then(|v| v.checked_add(2)))
                .and_then(|(a, b)| a.checked_mul(b))
                .and_then(|v| v.checked_mul(3)),
        )?;
        let numerator_factor = coefficient(i.checked_mul(27).and_then(|v| v.checked_sub(12)))?;
        let remainder_factor = coefficient(i.checked_mul(5).and_then(|v| v.checked_sub(2)))?;
        let q_factor = coefficient(
            i.checked_mul(2)
                .and_then(|v| v.checked_sub(1))
                .and_then(|v| v.checked_mul(i))
                .and_then(|v| v.checked_mul(10)),
        )?;
        let r_factor = coefficient(u.checked_mul(10))?;

        let numerator = self
            .q
            .multiply_small(numerator_factor)
            .add(&self.r.multiply_small(5));
        let y = numerator.exact_divide_floor(&self.t.multiply_small(5))?;
        let y = y
            .to_u64()
            .and_then(|v| u8::try_from(v).ok())
            .and_then(Digit::new)
            .ok_or(ArithmeticError::NonDecimalDigit)?;

        let remainder = self
            .q
            .multiply_small(remainder_factor)
            .add(&self.r)
            .checked_sub(&self.t.multiply_small(u64::from(y.value())))?;

        self.r = remainder.multiply_small(r_factor);
        self.q = self.q.multiply_small(q_factor);
        self.t = self.t.multiply_small(u);
        self.i += 1;

        Ok(y)
    }
}

impl Iterator for Spigot {
    type Item = Result<Digit, ArithmeticError>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_digit())
    }
}
