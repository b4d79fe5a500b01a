//! Memo write use-cases.
//!
//! # Responsibility
//! - Validate new memos through entity construction before persisting.
//! - Enforce time windows before updates and deletes reach the repository.
//!
//! # Invariants
//! - Updates persist only the fields the caller supplied.
//! - Deletion is permitted iff the memo is expired or still modifiable.
//! - Not-found is `Ok(None)`/`Ok(false)`, never an error.

use crate::model::memo::{Memo, MemoPatch, MemoRecord};
use crate::repo::memo_repo::MemoRepository;
use crate::service::{require_id, MemoOperation, MemoServiceError, WithOperation};
use log::{info, warn};

/// Write-side service facade over a repository implementation.
pub struct MemoWriteService<R: MemoRepository> {
    repo: R,
}

impl<R: MemoRepository> MemoWriteService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates and persists a new memo.
    pub fn create_memo(&self, title: &str, content: &str) -> Result<MemoRecord, MemoServiceError> {
        let memo = Memo::new(title, content).during(MemoOperation::Create)?;
        let created = self
            .repo
            .create(&memo.to_record())
            .during(MemoOperation::Create)?;

        info!(
            "event=memo_create module=service status=ok memo_id={} title_chars={} content_chars={}",
            created.id,
            created.title.chars().count(),
            created.content.chars().count()
        );
        Ok(created)
    }

    /// Updates title and/or content within the 24h modifiable window.
    ///
    /// Returns `Ok(None)` when no memo has the given id.
    pub fn update_memo(
        &self,
        id: &str,
        title: Option<&str>,
        content: Option<&str>,
    ) -> Result<Option<MemoRecord>, MemoServiceError> {
        let id = require_id(id, MemoOperation::Update)?;
        let Some(existing) = self.repo.find_by_id(id).during(MemoOperation::Update)? else {
            return Ok(None);
        };

        let memo = Memo::from_record(&existing).during(MemoOperation::Update)?;
        let updated = memo
            .update_content(title, content)
            .during(MemoOperation::Update)
            .inspect_err(|err| {
                warn!(
                    "event=memo_update module=service status=rejected memo_id={} error={}",
                    id, err
                );
            })?;

        let patch = MemoPatch {
            title: title.map(|_| updated.title().to_string()),
            content: content.map(|_| updated.content().to_string()),
        };
        let persisted = self
            .repo
            .update(id, &patch)
            .during(MemoOperation::Update)?;

        info!(
            "event=memo_update module=service status=ok memo_id={} found={}",
            id,
            persisted.is_some()
        );
        Ok(persisted)
    }

    /// Deletes a memo that is either still modifiable or already expired.
    ///
    /// Returns `Ok(false)` when no memo has the given id.
    pub fn delete_memo(&self, id: &str) -> Result<bool, MemoServiceError> {
        let id = require_id(id, MemoOperation::Delete)?;
        let Some(existing) = self.repo.find_by_id(id).during(MemoOperation::Delete)? else {
            return Ok(false);
        };

        let memo = Memo::from_record(&existing).during(MemoOperation::Delete)?;
        memo.ensure_deletable()
            .during(MemoOperation::Delete)
            .inspect_err(|err| {
                warn!(
                    "event=memo_delete module=service status=rejected memo_id={} error={}",
                    id, err
                );
            })?;

        let deleted = self.repo.delete(id).during(MemoOperation::Delete)?;
        info!(
            "event=memo_delete module=service status=ok memo_id={} deleted={}",
            id, deleted
        );
        Ok(deleted)
    }
}
