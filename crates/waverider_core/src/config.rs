//! Runtime configuration for the core.
//!
//! # Responsibility
//! - Name the single storage slot that holds the persisted application state.
//! - Resolve the SQLite file backing the durable key-value store.
//!
//! # Invariants
//! - `storage_key` is never empty.
//! - Environment overrides are trimmed; blank values fall back to defaults.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Storage slot used when no override is configured.
pub const DEFAULT_STORAGE_KEY: &str = "waveRider";
/// Environment variable overriding the SQLite file location.
pub const DB_PATH_ENV: &str = "WAVERIDER_DB_PATH";
const DEFAULT_DB_FILE_NAME: &str = "waverider.sqlite3";

/// Core configuration shared by controller and store bootstrap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// Key under which the whole application state is serialized.
    pub storage_key: String,
    /// SQLite file path for the durable key-value store.
    pub db_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyStorageKey,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyStorageKey => write!(f, "storage key cannot be empty"),
        }
    }
}

impl Error for ConfigError {}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            db_path: default_db_path(),
        }
    }
}

impl CoreConfig {
    /// Builds configuration from defaults plus `WAVERIDER_DB_PATH`.
    pub fn from_env() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            db_path: resolve_db_path(std::env::var(DB_PATH_ENV).ok()),
        }
    }

    /// Returns a copy using a different storage slot.
    pub fn with_storage_key(mut self, storage_key: impl Into<String>) -> Self {
        self.storage_key = storage_key.into();
        self
    }

    /// Returns a copy using a different SQLite file.
    pub fn with_db_path(mut self, db_path: impl Into<PathBuf>) -> Self {
        self.db_path = db_path.into();
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::EmptyStorageKey);
        }
        Ok(())
    }
}

fn resolve_db_path(raw: Option<String>) -> PathBuf {
    raw.as_deref()
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map_or_else(default_db_path, PathBuf::from)
}

fn default_db_path() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)
}
