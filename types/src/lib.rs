//! Core domain types for the pi digit engine.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory
#![allow(clippy::missing_panics_doc)] // Panics are documented in assertions

mod analysis;
mod digits;
mod error;
mod range;
pub mod settings;

pub use analysis::{Complexity, Pattern, PatternKind, RarityLabel, SequenceAnalysis};
pub use digits::{Digit, DigitOutOfRange, DigitString, format_with_decimal_point};
pub use error::{ArithmeticError, InternalError, QueryError};
pub use range::{RangeViolation, SequenceRange};
pub use settings::{EngineSettings, Profile, SettingsError};
