//! SQLite storage engine: bootstrap, migrations and the memo collection.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the memo core.
//! - Apply schema migrations in deterministic order.
//! - Expose the memo collection through the `MemoStore` engine contract.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Core code must not read/write memo data before migrations succeed.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;
pub mod store;

pub use open::{open_db, open_db_in_memory};
pub use store::{MemoStore, SqliteMemoStore, StorageMeta, StoredMemo};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// A stored document vanished between fetch and write-back.
    DocumentNotFound { seq: i64 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::DocumentNotFound { seq } => write!(f, "stored memo document {seq} not found"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } | Self::DocumentNotFound { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
