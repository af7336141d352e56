//! Resolved engine settings shared across crates.
//!
//! These types represent fully-validated configuration state. Raw TOML
//! deserialization structs (with `Option` fields) stay private in
//! `pidigits-config`, which resolves them into these types at the parse
//! boundary.

use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("max_position must be greater than zero")]
    ZeroCeiling,
    #[error("refill_batch must be greater than zero")]
    ZeroRefillBatch,
    #[error("refill_batch ({batch}) exceeds max_position ({ceiling})")]
    RefillBatchAboveCeiling { batch: usize, ceiling: u64 },
    #[error("max_request_length must be greater than zero")]
    ZeroRequestLength,
    #[error("max_request_length ({length}) exceeds max_position ({ceiling})")]
    RequestLengthAboveCeiling { length: u64, ceiling: u64 },
    #[error("unknown profile {0:?} (expected \"development\" or \"production\")")]
    UnknownProfile(String),
}

/// Deployment profile selecting default cache lifetimes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    #[default]
    Development,
    Production,
}

impl Profile {
    #[must_use]
    pub const fn default_cache_ttl(self) -> Duration {
        match self {
            Profile::Development => Duration::from_secs(60 * 60),
            Profile::Production => Duration::from_secs(24 * 60 * 60),
        }
    }
}

impl FromStr for Profile {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Profile::Development),
            "production" | "prod" => Ok(Profile::Production),
            other => Err(SettingsError::UnknownProfile(other.to_string())),
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Profile::Development => f.write_str("development"),
            Profile::Production => f.write_str("production"),
        }
    }
}

/// Validated engine settings.
///
/// Invariants: `max_position > 0`, `0 < max_request_length <= max_position`.
/// A `request_timeout` of `None` means requests are only bounded by the
/// ceiling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    cache_ttl: Duration,
    max_position: u64,
    refill_batch: NonZeroUsize,
    request_timeout: Option<Duration>,
    max_request_length: u64,
}

impl EngineSettings {
    pub const DEFAULT_MAX_POSITION: u64 = 1_000_000;
    pub const DEFAULT_REFILL_BATCH: NonZeroUsize = NonZeroUsize::new(1000).unwrap();
    pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
    pub const DEFAULT_MAX_REQUEST_LENGTH: u64 = 100_000;

    pub fn new(
        cache_ttl: Duration,
        max_position: u64,
        refill_batch: usize,
        request_timeout: Option<Duration>,
        max_request_length: u64,
    ) -> Result<Self, SettingsError> {
        if max_position == 0 {
            return Err(SettingsError::ZeroCeiling);
        }
        let refill_batch = NonZeroUsize::new(refill_batch).ok_or(SettingsError::ZeroRefillBatch)?;
        if u64::try_from(refill_batch.get())
            .ok()
            .is_none_or(|batch| batch > max_position)
        {
            return Err(SettingsError::RefillBatchAboveCeiling {
                batch: refill_batch.get(),
                ceiling: max_position,
            });
        }
        if max_request_length == 0 {
            return Err(SettingsError::ZeroRequestLength);
        }
        if max_request_length > max_position {
            return Err(SettingsError::RequestLengthAboveCeiling {
                length: max_request_length,
                ceiling: max_position,
            });
        }
        Ok(Self {
            cache_ttl,
            max_position,
            refill_batch,
            request_timeout,
            max_request_length,
        })
    }

    #[must_use]
    pub fn for_profile(profile: Profile) -> Self {
        Self {
            cache_ttl: profile.default_cache_ttl(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn cache_ttl(&self) -> Duration {
        self.cache_ttl
    }

    #[must_use]
    pub fn max_position(&self) -> u64 {
        self.max_position
    }

    #[must_use]
    pub fn refill_batch(&self) -> NonZeroUsize {
        self.refill_batch
    }

    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }

    #[must_use]
    pub fn max_request_length(&self) -> u64 {
        self.max_request_length
    }

    #[must_use]
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            cache_ttl: Profile::Development.default_cache_ttl(),
            max_position: Self::DEFAULT_MAX_POSITION,
            refill_batch: Self::DEFAULT_REFILL_BATCH,
            request_timeout: Some(Self::DEFAULT_REQUEST_TIMEOUT),
            max_request_length: Self::DEFAULT_MAX_REQUEST_LENGTH,
        }
    }
}
