//! Database configuration resolved from the process environment.
//!
//! # Responsibility
//! - Resolve where the parcel database lives and how long writers wait on
//!   a locked database.
//!
//! # Invariants
//! - A blank or unset path selects an in-memory database.
//! - Busy timeout is always positive.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable holding the database file path.
pub const DB_PATH_ENV: &str = "PARCEL_TRACKER_DB_PATH";
/// Environment variable holding the busy timeout in milliseconds.
pub const BUSY_TIMEOUT_ENV: &str = "PARCEL_TRACKER_BUSY_TIMEOUT_MS";

pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidBusyTimeout(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBusyTimeout(value) => write!(
                f,
                "{BUSY_TIMEOUT_ENV} must be a positive integer of milliseconds, got `{value}`"
            ),
        }
    }
}

impl Error for ConfigError {}

/// Connection settings for the parcel store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    /// Database file. `None` means in-memory.
    pub path: Option<PathBuf>,
    pub busy_timeout: Duration,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            path: None,
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }
}

impl DbConfig {
    /// Reads configuration from `PARCEL_TRACKER_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let path = lookup(DB_PATH_ENV)
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .map(PathBuf::from);

        let busy_timeout = match lookup(BUSY_TIMEOUT_ENV) {
            Some(raw) if !raw.trim().is_empty() => parse_busy_timeout(raw.trim())?,
            _ => DEFAULT_BUSY_TIMEOUT,
        };

        Ok(Self { path, busy_timeout })
    }
}

fn parse_busy_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match raw.parse::<u64>() {
        Ok(millis) if millis > 0 => Ok(Duration::from_millis(millis)),
        _ => Err(ConfigError::InvalidBusyTimeout(raw.to_string())),
    }
}
