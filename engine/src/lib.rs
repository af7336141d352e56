//! Query engine for pi digits.
//!
//! [`PiService`] is the entry point collaborators use. It owns one digit tape
//! (and the generator behind it) plus one window cache; nothing is global, so
//! independent services never share state.
//!
//! ```text
//! get_sequence(start, length)
//!   -> validate range / ceiling
//!   -> cache hit?  -> return
//!   -> tape.extend_to(end)   (generator advances only past the tape end)
//!   -> cache.put -> return
//! ```

mod identity;
mod service;
mod tape;

pub use identity::{IDENTITY_LENGTH, PiDentity, position_from_seed};
pub use service::{PiService, QueryStats, VALIDATION_SEARCH_LIMIT};
pub use tape::DigitTape;

pub use pidigits_core::{CacheStats, CancellationToken, Clock, ManualClock, SystemClock};
pub use pidigits_types::{
    Complexity, Digit, DigitString, EngineSettings, InternalError, Pattern, PatternKind, Profile,
    QueryError, RarityLabel, SequenceAnalysis, SequenceRange, format_with_decimal_point,
};
