//! Memo repository contract and store-backed implementation.
//!
//! # Responsibility
//! - Provide paginated/sorted retrieval, lookup, insert, partial update and
//!   delete over the memo collection.
//! - Strip engine bookkeeping so only `MemoRecord` crosses into the domain.
//!
//! # Invariants
//! - `find_all` sorts by `regdate DESC` over a full snapshot on every call.
//! - Absence is reported as `None`/`false`, never as an error.
//! - Flush failures are logged and never fail the mutation that caused them.

use crate::db::{DbError, MemoStore, SqliteMemoStore, StoredMemo};
use crate::model::memo::{MemoPatch, MemoRecord};
use log::{debug, warn};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error wrapping storage engine failures.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for memo persistence.
pub trait MemoRepository {
    /// Returns one page of memos sorted by `regdate DESC`.
    fn find_all(&self, page: u32, page_size: u32) -> RepoResult<Vec<MemoRecord>>;
    /// Exact-match lookup by id.
    fn find_by_id(&self, id: &str) -> RepoResult<Option<MemoRecord>>;
    /// Inserts a record and returns the stored shape.
    fn create(&self, record: &MemoRecord) -> RepoResult<MemoRecord>;
    /// Merges the defined patch fields onto an existing record.
    fn update(&self, id: &str, patch: &MemoPatch) -> RepoResult<Option<MemoRecord>>;
    /// Removes a record; returns whether anything was removed.
    fn delete(&self, id: &str) -> RepoResult<bool>;
}

/// Repository over any [`MemoStore`] engine.
///
/// The engine handle is owned privately and only reached through this type.
#[derive(Debug, Clone)]
pub struct StoreMemoRepository<S: MemoStore> {
    store: S,
}

/// Repository backed by the SQLite memo collection.
pub type SqliteMemoRepository<'conn> = StoreMemoRepository<SqliteMemoStore<'conn>>;

impl<S: MemoStore> StoreMemoRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    fn flush(&self, operation: &'static str) {
        if let Err(err) = self.store.save() {
            warn!(
                "event=memo_flush module=repo status=error operation={} error={}",
                operation, err
            );
        }
    }
}

impl<'conn> StoreMemoRepository<SqliteMemoStore<'conn>> {
    /// Builds a repository from a migrated connection.
    pub fn from_connection(conn: &'conn Connection) -> Self {
        Self::new(SqliteMemoStore::new(conn))
    }
}

impl<S: MemoStore> MemoRepository for StoreMemoRepository<S> {
    fn find_all(&self, page: u32, page_size: u32) -> RepoResult<Vec<MemoRecord>> {
        let mut all = self.store.find()?;
        all.sort_by(|left, right| right.record.regdate.cmp(&left.record.regdate));

        let total = all.len();
        let items = page_window(page, page_size, total)
            .map(|(start, end)| {
                all.drain(start..end)
                    .map(strip_internal_fields)
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        debug!(
            "event=memo_find_all module=repo status=ok page={} page_size={} total={} returned={}",
            page,
            page_size,
            total,
            items.len()
        );
        Ok(items)
    }

    fn find_by_id(&self, id: &str) -> RepoResult<Option<MemoRecord>> {
        Ok(self.store.find_one(id)?.map(strip_internal_fields))
    }

    fn create(&self, record: &MemoRecord) -> RepoResult<MemoRecord> {
        let stored = self.store.insert(record)?;
        self.flush("create");
        Ok(strip_internal_fields(stored))
    }

    fn update(&self, id: &str, patch: &MemoPatch) -> RepoResult<Option<MemoRecord>> {
        let Some(mut stored) = self.store.find_one(id)? else {
            return Ok(None);
        };
        if patch.is_empty() {
            return Ok(Some(strip_internal_fields(stored)));
        }

        if let Some(title) = patch.title.as_ref() {
            stored.record.title = title.clone();
        }
        if let Some(content) = patch.content.as_ref() {
            stored.record.content = content.clone();
        }

        let updated = self.store.update(&stored)?;
        self.flush("update");
        Ok(Some(strip_internal_fields(updated)))
    }

    fn delete(&self, id: &str) -> RepoResult<bool> {
        let Some(stored) = self.store.find_one(id)? else {
            return Ok(false);
        };

        self.store.remove(&stored)?;
        self.flush("delete");
        Ok(true)
    }
}

/// Drops engine bookkeeping (`seq`, `meta`) and keeps the plain record.
fn strip_internal_fields(stored: StoredMemo) -> MemoRecord {
    stored.record
}

/// Computes `[(page-1)*size, page*size)` clamped to `total`.
///
/// Returns `None` when the window is empty.
fn page_window(page: u32, page_size: u32, total: usize) -> Option<(usize, usize)> {
    if page == 0 || page_size == 0 {
        return None;
    }
    let size = page_size as usize;
    let start = (page as usize - 1).saturating_mul(size);
    if start >= total {
        return None;
    }
    let end = start.saturating_add(size).min(total);
    Some((start, end))
}

#[cfg(test)]
mod tests {
    use super::page_window;

    #[test]
    fn page_window_slices_one_based_pages() {
        assert_eq!(page_window(1, 10, 15), Some((0, 10)));
        assert_eq!(page_window(2, 10, 15), Some((10, 15)));
        assert_eq!(page_window(3, 10, 15), None);
    }

    #[test]
    fn page_window_treats_zero_inputs_as_empty() {
        assert_eq!(page_window(0, 10, 15), None);
        assert_eq!(page_window(1, 0, 15), None);
    }
}
