//! Memo read use-cases.
//!
//! # Responsibility
//! - Rebuild entities from repository records and decorate them with
//!   derived fields (`wordCount`, `canBeModified`, `isExpired`).
//!
//! # Invariants
//! - A persisted record that violates memo rules surfaces as a validation
//!   error instead of being returned.
//! - `get_memo_exists` never propagates failures.

use crate::model::memo::{now_epoch_ms, Memo, MemoRecord, MemoValidationError, MemoView};
use crate::repo::memo_repo::MemoRepository;
use crate::service::{require_id, MemoOperation, MemoServiceError, WithOperation};
use log::{debug, warn};

/// Upper bound of records scanned when listing expired memos.
const EXPIRED_SCAN_LIMIT: u32 = 1000;

/// Read-side service facade over a repository implementation.
pub struct MemoReadService<R: MemoRepository> {
    repo: R,
}

impl<R: MemoRepository> MemoReadService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists one page of memos, newest first, with derived fields.
    pub fn get_all_memos(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<MemoView>, MemoServiceError> {
        let records = self
            .repo
            .find_all(page, page_size)
            .during(MemoOperation::List)?;
        let now_ms = now_epoch_ms();
        let views = records
            .iter()
            .map(|record| decorate(record, now_ms))
            .collect::<Result<Vec<_>, MemoValidationError>>()
            .during(MemoOperation::List)?;

        debug!(
            "event=memo_list module=service status=ok page={} page_size={} returned={}",
            page,
            page_size,
            views.len()
        );
        Ok(views)
    }

    /// Gets one memo by id; `Ok(None)` when it does not exist.
    pub fn get_memo_by_id(&self, id: &str) -> Result<Option<MemoView>, MemoServiceError> {
        let id = require_id(id, MemoOperation::Lookup)?;
        let Some(record) = self.repo.find_by_id(id).during(MemoOperation::Lookup)? else {
            return Ok(None);
        };

        let view = decorate(&record, now_epoch_ms()).during(MemoOperation::Lookup)?;
        Ok(Some(view))
    }

    /// Returns whether a memo exists; any failure reads as `false`.
    pub fn get_memo_exists(&self, id: &str) -> bool {
        match self.get_memo_by_id(id) {
            Ok(found) => found.is_some(),
            Err(err) => {
                warn!(
                    "event=memo_exists module=service status=error error={}",
                    err
                );
                false
            }
        }
    }

    /// Lists expired memos among the newest records.
    pub fn get_expired_memos(&self) -> Result<Vec<MemoRecord>, MemoServiceError> {
        let records = self
            .repo
            .find_all(1, EXPIRED_SCAN_LIMIT)
            .during(MemoOperation::ListExpired)?;
        let now_ms = now_epoch_ms();

        let mut expired = Vec::new();
        for record in &records {
            let memo = Memo::from_record(record).during(MemoOperation::ListExpired)?;
            if memo.is_expired_at(now_ms) {
                expired.push(memo.to_record());
            }
        }
        Ok(expired)
    }
}

fn decorate(record: &MemoRecord, now_ms: i64) -> Result<MemoView, MemoValidationError> {
    Memo::from_record(record).map(|memo| memo.to_view_at(now_ms))
}
