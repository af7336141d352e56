//! Core computation for the pi digit engine.
//!
//! Leaves first:
//!
//! - **`bigint`**: unbounded non-negative integers backing the spigot state
//! - **`spigot`**: forward-only generator of the decimal digits of pi
//! - **`cache`**: TTL cache keyed by `(start, length)` windows
//! - **`analyzer`**: repeat/triplet detection and rarity classification
//! - **`cancel`**: cooperative cancellation and per-request time budgets
//!
//! Nothing here locks or spawns; the engine crate decides how these pieces are
//! shared.

pub mod analyzer;
pub mod bigint;
pub mod cache;
pub mod cancel;
pub mod spigot;

pub use analyzer::{analyze, analyze_digits, calculate_rarity, find_patterns, parse_window};
pub use bigint::Natural;
pub use cache::{CacheStats, Clock, ManualClock, SequenceCache, SystemClock};
pub use cancel::{CancellationToken, Deadline};
pub use spigot::Spigot;
