//! Configuration loading for the pi digit engine.
//!
//! The raw TOML document (`~/.pidigits/config.toml`) is deserialized into
//! [`PiConfig`], overlaid with `PIDIGITS_*` environment variables, and resolved
//! into a validated [`EngineSettings`].

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use toml::de;

use pidigits_types::{EngineSettings, Profile, SettingsError};

pub const ENV_PROFILE: &str = "PIDIGITS_ENV";
pub const ENV_CACHE_TTL_MS: &str = "PIDIGITS_CACHE_TTL_MS";
pub const ENV_MAX_POSITION: &str = "PIDIGITS_MAX_POSITION";
pub const ENV_REFILL_BATCH: &str = "PIDIGITS_REFILL_BATCH";
pub const ENV_REQUEST_TIMEOUT_MS: &str = "PIDIGITS_REQUEST_TIMEOUT_MS";
pub const ENV_MAX_REQUEST_LENGTH: &str = "PIDIGITS_MAX_REQUEST_LENGTH";

#[derive(Debug, Default, Deserialize)]
pub struct PiConfig {
    pub engine: Option<EngineConfig>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct EngineConfig {
    /// "development" or "production". Supports `${VAR}` expansion.
    pub profile: Option<String>,
    pub cache_ttl_ms: Option<u64>,
    pub max_position: Option<u64>,
    pub refill_batch: Option<usize>,
    /// Per-request time budget; `0` disables it.
    pub request_timeout_ms: Option<u64>,
    pub max_request_length: Option<u64>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config at {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: de::Error,
    },
    #[error(transparent)]
    Invalid(#[from] SettingsError),
}

/// Replace `${VAR}` references using `lookup`. Unknown variables expand to
/// the empty string; an unclosed `${` is kept verbatim.
pub fn expand_vars_with(value: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(open) = rest.find("${") {
        let after = &rest[open + 2..];
        let Some(close) = after.find('}') else {
            break;
        };
        out.push_str(&rest[..open]);
        let var = &after[..close];
        if !var.is_empty() {
            out.push_str(&lookup(var).unwrap_or_default());
        }
        rest = &after[close + 1..];
    }

    out.push_str(rest);
    out
}

pub fn expand_env_vars(value: &str) -> String {
    expand_vars_with(value, |var| env::var(var).ok())
}

#[must_use]
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".pidigits").join("config.toml"))
}

impl PiConfig {
    /// Load from the default path. `Ok(None)` when no file exists.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content)
            .map(Some)
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Resolve against the process environment.
    pub fn resolve(&self) -> Result<EngineSettings, ConfigError> {
        self.resolve_with(|var| env::var(var).ok())
    }

    /// Resolve with an explicit variable lookup. Environment values win over
    /// file values, which win over profile defaults.
    pub fn resolve_with(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<EngineSettings, ConfigError> {
        let raw = self.engine.clone().unwrap_or_default();
        let env_value = |name: &str| {
            lookup(name)
                .map(|value| expand_vars_with(&value, &lookup))
                .filter(|value| !value.trim().is_empty())
        };

        let profile = match env_value(ENV_PROFILE).or_else(|| {
            raw.profile
                .as_deref()
                .map(|p| expand_vars_with(p, &lookup))
        }) {
            Some(name) => name.parse::<Profile>()?,
            None => Profile::default(),
        };
        let defaults = EngineSettings::for_profile(profile);

        let cache_ttl_ms =
            env_number(ENV_CACHE_TTL_MS, env_value(ENV_CACHE_TTL_MS)).or(raw.cache_ttl_ms);
        let max_position = env_number(ENV_MAX_POSITION, env_value(ENV_MAX_POSITION))
            .or(raw.max_position)
            .unwrap_or(defaults.max_position());
        let refill_batch = env_number(ENV_REFILL_BATCH, env_value(ENV_REFILL_BATCH))
            .or(raw.refill_batch)
            .unwrap_or_else(|| {
                let ceiling = usize::try_from(max_position).unwrap_or(usize::MAX);
                defaults.refill_batch().get().min(ceiling)
            });
        let request_timeout_ms =
            env_number(ENV_REQUEST_TIMEOUT_MS, env_value(ENV_REQUEST_TIMEOUT_MS))
                .or(raw.request_timeout_ms);
        let max_request_length =
            env_number(ENV_MAX_REQUEST_LENGTH, env_value(ENV_MAX_REQUEST_LENGTH))
                .or(raw.max_request_length)
                .unwrap_or_else(|| defaults.max_request_length().min(max_position));

        let cache_ttl = cache_ttl_ms.map_or(defaults.cache_ttl(), Duration::from_millis);
        let request_timeout = match request_timeout_ms {
            Some(0) => None,
            Some(ms) => Some(Duration::from_millis(ms)),
            None => defaults.request_timeout(),
        };

        Ok(EngineSettings::new(
            cache_ttl,
            max_position,
            refill_batch,
            request_timeout,
            max_request_length,
        )?)
    }
}

fn env_number<T: FromStr>(name: &str, value: Option<String>) -> Option<T> {
    let value = value?;
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            tracing::warn!("Ignoring {name}={value:?}: not a valid number");
            None
        }
    }
}

/// Load and resolve settings, falling back to defaults on any error.
///
/// Failures are logged rather than returned so a broken config file never
/// prevents the engine from starting.
#[must_use]
pub fn load_settings() -> EngineSettings {
    let config = match PiConfig::load() {
        Ok(config) => config.unwrap_or_default(),
        Err(err) => {
            tracing::warn!("{err}; using defaults");
            PiConfig::default()
        }
    };
    match config.resolve() {
        Ok(settings) => settings,
        Err(err) => {
            tracing::warn!("Invalid engine settings: {err}; using defaults");
            EngineSettings::default()
        }
    }
}
