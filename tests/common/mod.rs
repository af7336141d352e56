//! Shared test utilities and fixtures
//!
//! Common infrastructure for integration tests.

#![allow(dead_code)]

use std::time::Duration;

use pidigits_engine::{EngineSettings, ManualClock, PiService};

/// First 50 digits of pi, no decimal point.
pub const PI_50: &str = "31415926535897932384626433832795028841971693993751";

/// TTL used by [`small_service`].
pub const TEST_TTL: Duration = Duration::from_secs(60);

/// Settings with a low ceiling and a small refill batch so tests exercise
/// several refills without generating many digits.
pub fn small_settings() -> EngineSettings {
    EngineSettings::new(TEST_TTL, 2_000, 16, None, 500).expect("valid test settings")
}

/// A service over [`small_settings`] driven by a manual clock.
pub fn small_service() -> (PiService<ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    let service = PiService::with_clock(small_settings(), clock.clone());
    (service, clock)
}
