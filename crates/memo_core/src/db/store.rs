//! Memo collection storage engine.
//!
//! # Responsibility
//! - Define the engine contract (`MemoStore`) the repository is built on.
//! - Keep engine bookkeeping (`seq`, `meta`) next to each stored record.
//!
//! # Invariants
//! - `find` returns records in insertion order; callers must not rely on
//!   any other ordering.
//! - `update` bumps `meta.revision` and stamps `meta.updated`.
//! - Mutations are visible immediately; `save` only flushes to disk.

use super::{DbError, DbResult};
use crate::model::memo::{now_epoch_ms, MemoRecord};
use rusqlite::{params, Connection, OptionalExtension, Row};

const MEMO_SELECT_SQL: &str = "SELECT
    seq,
    id,
    title,
    content,
    regdate,
    meta_revision,
    meta_created,
    meta_updated
FROM memos";

/// Engine-owned change metadata attached to every stored memo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageMeta {
    /// Incremented on every engine-level update.
    pub revision: i64,
    /// Insert time in epoch milliseconds.
    pub created: i64,
    /// Last update time in epoch milliseconds, `None` until first update.
    pub updated: Option<i64>,
}

/// A memo record as held by the storage engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMemo {
    /// Engine sequence number.
    pub seq: i64,
    pub meta: StorageMeta,
    pub record: MemoRecord,
}

/// Storage engine contract over an unordered, id-keyed memo collection.
pub trait MemoStore {
    /// Returns a snapshot of every stored memo.
    fn find(&self) -> DbResult<Vec<StoredMemo>>;
    /// Looks up one memo by exact id.
    fn find_one(&self, id: &str) -> DbResult<Option<StoredMemo>>;
    /// Inserts a record and returns it with engine metadata attached.
    fn insert(&self, record: &MemoRecord) -> DbResult<StoredMemo>;
    /// Writes back a previously fetched memo.
    fn update(&self, stored: &StoredMemo) -> DbResult<StoredMemo>;
    /// Removes a previously fetched memo.
    fn remove(&self, stored: &StoredMemo) -> DbResult<()>;
    /// Flushes pending writes to durable storage.
    fn save(&self) -> DbResult<()>;
}

/// SQLite-backed memo collection.
#[derive(Debug, Clone, Copy)]
pub struct SqliteMemoStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteMemoStore<'conn> {
    /// Wraps a migrated connection (see [`crate::db::open_db`]).
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn find_by_seq(&self, seq: i64) -> DbResult<StoredMemo> {
        self.conn
            .query_row(
                &format!("{MEMO_SELECT_SQL} WHERE seq = ?1;"),
                [seq],
                parse_stored_row,
            )
            .optional()?
            .ok_or(DbError::DocumentNotFound { seq })
    }
}

impl MemoStore for SqliteMemoStore<'_> {
    fn find(&self) -> DbResult<Vec<StoredMemo>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{MEMO_SELECT_SQL} ORDER BY seq ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut memos = Vec::new();
        while let Some(row) = rows.next()? {
            memos.push(parse_stored_row(row)?);
        }
        Ok(memos)
    }

    fn find_one(&self, id: &str) -> DbResult<Option<StoredMemo>> {
        let stored = self
            .conn
            .query_row(
                &format!("{MEMO_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_stored_row,
            )
            .optional()?;
        Ok(stored)
    }

    fn insert(&self, record: &MemoRecord) -> DbResult<StoredMemo> {
        self.conn.execute(
            "INSERT INTO memos (
                id,
                title,
                content,
                regdate,
                meta_revision,
                meta_created
            ) VALUES (?1, ?2, ?3, ?4, 0, ?5);",
            params![
                record.id.as_str(),
                record.title.as_str(),
                record.content.as_str(),
                record.regdate,
                now_epoch_ms(),
            ],
        )?;
        self.find_by_seq(self.conn.last_insert_rowid())
    }

    fn update(&self, stored: &StoredMemo) -> DbResult<StoredMemo> {
        let changed = self.conn.execute(
            "UPDATE memos
             SET
                id = ?1,
                title = ?2,
                content = ?3,
                regdate = ?4,
                meta_revision = meta_revision + 1,
                meta_updated = ?5
             WHERE seq = ?6;",
            params![
                stored.record.id.as_str(),
                stored.record.title.as_str(),
                stored.record.content.as_str(),
                stored.record.regdate,
                now_epoch_ms(),
                stored.seq,
            ],
        )?;

        if changed == 0 {
            return Err(DbError::DocumentNotFound { seq: stored.seq });
        }

        self.find_by_seq(stored.seq)
    }

    fn remove(&self, stored: &StoredMemo) -> DbResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM memos WHERE seq = ?1;", [stored.seq])?;

        if changed == 0 {
            return Err(DbError::DocumentNotFound { seq: stored.seq });
        }

        Ok(())
    }

    fn save(&self) -> DbResult<()> {
        self.conn.cache_flush()?;
        Ok(())
    }
}

fn parse_stored_row(row: &Row<'_>) -> rusqlite::Result<StoredMemo> {
    Ok(StoredMemo {
        seq: row.get("seq")?,
        meta: StorageMeta {
            revision: row.get("meta_revision")?,
            created: row.get("meta_created")?,
            updated: row.get("meta_updated")?,
        },
        record: MemoRecord {
            id: row.get("id")?,
            title: row.get("title")?,
            content: row.get("content")?,
            regdate: row.get("regdate")?,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::{MemoStore, SqliteMemoStore};
    use crate::db::open_db_in_memory;
    use crate::model::memo::MemoRecord;

    fn record(id: &str, regdate: i64) -> MemoRecord {
        MemoRecord {
            id: id.to_string(),
            title: format!("title {id}"),
            content: "body".to_string(),
            regdate,
        }
    }

    #[test]
    fn insert_attaches_fresh_metadata() {
        let conn = open_db_in_memory().unwrap();
        let store = SqliteMemoStore::new(&conn);

        let stored = store.insert(&record("a", 10)).unwrap();
        assert!(stored.seq > 0);
        assert_eq!(stored.meta.revision, 0);
        assert_eq!(stored.meta.updated, None);
        assert_eq!(stored.record, record("a", 10));
    }

    #[test]
    fn update_bumps_revision() {
        let conn = open_db_in_memory().unwrap();
        let store = SqliteMemoStore::new(&conn);

        let mut stored = store.insert(&record("a", 10)).unwrap();
        stored.record.title = "changed".to_string();
        let updated = store.update(&stored).unwrap();
        assert_eq!(updated.meta.revision, 1);
        assert!(updated.meta.updated.is_some());
        assert_eq!(updated.record.title, "changed");
    }

    #[test]
    fn find_keeps_insertion_order_and_remove_drops_rows() {
        let conn = open_db_in_memory().unwrap();
        let store = SqliteMemoStore::new(&conn);

        let first = store.insert(&record("a", 30)).unwrap();
        store.insert(&record("b", 10)).unwrap();
        let ids: Vec<_> = store
            .find()
            .unwrap()
            .into_iter()
            .map(|stored| stored.record.id)
            .collect();
        assert_eq!(ids, vec!["a".to_string(), "b".to_string()]);

        store.remove(&first).unwrap();
        assert!(store.find_one("a").unwrap().is_none());
        assert!(store.remove(&first).is_err());
        store.save().unwrap();
    }
}
