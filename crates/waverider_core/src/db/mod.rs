//! SQLite file behind the durable key-value store.
//!
//! # Responsibility
//! - Open file-backed or in-memory connections for `SqliteKeyValueStore`.
//! - Bring the `kv_store` schema up to date before first use.
//!
//! # Invariants
//! - `PRAGMA user_version` equals the last applied migration.
//! - A file stamped by a newer build is refused, never downgraded.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure opening or querying the state database.
#[derive(Debug)]
pub enum DbError {
    /// The connection could not be established or configured.
    Open(rusqlite::Error),
    /// A statement failed on an open connection.
    Query(rusqlite::Error),
    /// The file carries a schema this build cannot read.
    SchemaTooNew { found: u32, supported: u32 },
}

impl DbError {
    /// Stable code used in `error_code=` log fields.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Open(_) => "db_open_failed",
            Self::Query(_) => "db_query_failed",
            Self::SchemaTooNew { .. } => "db_schema_too_new",
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open(err) => write!(f, "cannot open state database: {err}"),
            Self::Query(err) => write!(f, "state database query failed: {err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "state database uses schema {found} but this build reads up to {supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open(err) | Self::Query(err) => Some(err),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Query(value)
    }
}
