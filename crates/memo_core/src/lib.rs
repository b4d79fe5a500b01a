//! Core domain logic for the memo service.
//! This crate is the single source of truth for memo lifecycle invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{MemoStore, SqliteMemoStore, StorageMeta, StoredMemo};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::memo::{
    now_epoch_ms, Memo, MemoError, MemoId, MemoLifecycleError, MemoPatch, MemoRecord,
    MemoValidationError, MemoView, CONTENT_MAX_CHARS, DEFAULT_PAGE, DEFAULT_PAGE_SIZE,
    EXPIRY_WINDOW_MS, MODIFIABLE_WINDOW_MS, TITLE_MAX_CHARS,
};
pub use repo::memo_repo::{
    MemoRepository, RepoError, RepoResult, SqliteMemoRepository, StoreMemoRepository,
};
pub use service::read_service::MemoReadService;
pub use service::validation_service::{
    validate_create_memo, validate_memo_id, validate_pagination, validate_update_memo,
    PaginationReport, ValidationReport, PAGE_SIZE_MAX,
};
pub use service::write_service::MemoWriteService;
pub use service::{MemoOperation, MemoServiceError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
