//! Memo collection schema bootstrap.
//!
//! # Invariants
//! - The collection schema is versioned through `PRAGMA user_version`.
//! - Databases stamped with a newer version are refused, never downgraded.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

const MEMOS_SCHEMA_VERSION: u32 = 1;
const MEMOS_SCHEMA: &str = include_str!("0001_memos.sql");

/// Returns the memo schema version this binary writes.
pub fn latest_version() -> u32 {
    MEMOS_SCHEMA_VERSION
}

/// Creates the memo collection if the database predates it.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let found = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;

    match found {
        MEMOS_SCHEMA_VERSION => Ok(()),
        newer if newer > MEMOS_SCHEMA_VERSION => Err(DbError::UnsupportedSchemaVersion {
            db_version: newer,
            latest_supported: MEMOS_SCHEMA_VERSION,
        }),
        older => {
            let tx = conn.transaction()?;
            tx.execute_batch(MEMOS_SCHEMA)?;
            tx.pragma_update(None, "user_version", MEMOS_SCHEMA_VERSION)?;
            tx.commit()?;

            info!(
                "event=db_migrate module=db status=ok collection=memos from_version={} to_version={}",
                older, MEMOS_SCHEMA_VERSION
            );
            Ok(())
        }
    }
}
