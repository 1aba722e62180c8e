use std::env;

use chrono::{FixedOffset, Offset, Utc};
use tracing::debug;

use crate::errors::{ConfigError, TemporalError};

/// Settings shared by the parsers and the logging setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemporaConfig {
    /// Offset applied to timestamps written without a zone.
    pub default_offset: FixedOffset,
    /// Level handed to [`crate::logging::init_tracing`].
    pub log_level: Option<String>,
}

impl Default for TemporaConfig {
    fn default() -> Self {
        Self {
            default_offset: Utc.fix(),
            log_level: None,
        }
    }
}

impl TemporaConfig {
    /// Loads configuration from the process environment (`TEMPORA_*`).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with_prefix("TEMPORA_")
    }

    /// Loads configuration from env vars prefixed with the provided value.
    pub fn from_env_with_prefix(prefix: &str) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let key = |suffix: &str| format!("{}{}", prefix, suffix);

        let offset_key = key("DEFAULT_OFFSET");
        let default_offset = match env::var(&offset_key) {
            Ok(raw) => parse_offset(&raw).ok_or(ConfigError::InvalidEnvVar {
                key: offset_key,
                value: raw,
            })?,
            Err(_) => Utc.fix(),
        };

        let log_level = env::var(key("LOG")).ok().filter(|level| !level.is_empty());
        debug!(prefix, offset = %default_offset, log_level = ?log_level, "loaded configuration");

        Ok(Self {
            default_offset,
            log_level,
        })
    }

    pub fn log_level(&self) -> Option<&str> {
        self.log_level.as_deref()
    }
}

/// Parses `Z`, `UTC`, `+hh`, `+hhmm` or `+hh:mm` into a fixed offset.
pub fn parse_offset(raw: &str) -> Option<FixedOffset> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("z") || raw.eq_ignore_ascii_case("utc") {
        return Some(Utc.fix());
    }

    let (sign, digits) = match raw.as_bytes().first()? {
        b'+' => (1, &raw[1..]),
        b'-' => (-1, &raw[1..]),
        _ => return None,
    };
    let digits: String = digits.chars().filter(|c| *c != ':').collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let (hours, minutes) = match digits.len() {
        2 => (digits.parse::<i32>().ok()?, 0),
        4 => (digits[..2].parse::<i32>().ok()?, digits[2..].parse::<i32>().ok()?),
        _ => return None,
    };
    if minutes >= 60 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Helper that loads config and converts to the canonical tempora error type.
pub fn load_config() -> Result<TemporaConfig, TemporalError> {
    Ok(TemporaConfig::from_env()?)
}
