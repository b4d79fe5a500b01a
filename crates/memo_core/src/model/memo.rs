//! Memo domain model.
//!
//! # Responsibility
//! - Define the canonical memo value and the plain record shape persisted by
//!   repositories.
//! - Own the time-gated lifecycle rules (modifiable window, expiry window).
//!
//! # Invariants
//! - `title` is 1..=200 chars and `content` 1..=5000 chars after trimming.
//! - `id` and `regdate` never change once a memo exists.
//! - Derived fields (`word_count`, `can_be_modified`, `is_expired`) are
//!   computed on demand and never persisted.
//!
//! # See also
//! - crates/memo_core/src/service/write_service.rs

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Maximum title length in chars, measured after trimming.
pub const TITLE_MAX_CHARS: usize = 200;
/// Maximum content length in chars, measured after trimming.
pub const CONTENT_MAX_CHARS: usize = 5000;
/// Updates are allowed while `now - regdate` is below this window.
pub const MODIFIABLE_WINDOW_MS: i64 = 24 * 60 * 60 * 1000;
/// A memo is expired once `now - regdate` exceeds this window.
pub const EXPIRY_WINDOW_MS: i64 = 30 * MODIFIABLE_WINDOW_MS;
/// Default 1-based page number for memo listings.
pub const DEFAULT_PAGE: u32 = 1;
/// Default page size for memo listings.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Opaque memo identifier.
pub type MemoId = String;

/// Returns the current wall clock in epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}

/// Construction-time rule violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoValidationError {
    /// Title absent or blank after trim.
    MissingTitle,
    /// Content absent or blank after trim.
    MissingContent,
    /// Trimmed title exceeds [`TITLE_MAX_CHARS`].
    TitleTooLong { chars: usize },
    /// Trimmed content exceeds [`CONTENT_MAX_CHARS`].
    ContentTooLong { chars: usize },
    /// Memo id absent or blank after trim.
    MissingId,
}

impl Display for MemoValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingTitle => write!(f, "title is required"),
            Self::MissingContent => write!(f, "content is required"),
            Self::TitleTooLong { chars } => write!(
                f,
                "title must not exceed {TITLE_MAX_CHARS} characters (got {chars})"
            ),
            Self::ContentTooLong { chars } => write!(
                f,
                "content must not exceed {CONTENT_MAX_CHARS} characters (got {chars})"
            ),
            Self::MissingId => write!(f, "memo id is required"),
        }
    }
}

impl Error for MemoValidationError {}

/// Operation attempted outside its permitted time window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoLifecycleError {
    /// Update requested after the 24h modifiable window closed.
    ModifyWindowClosed { id: MemoId },
    /// Delete requested between the modifiable window and expiry.
    DeleteWindowClosed { id: MemoId },
}

impl Display for MemoLifecycleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ModifyWindowClosed { id } => write!(
                f,
                "memo {id} can no longer be modified: more than 24 hours have passed since creation"
            ),
            Self::DeleteWindowClosed { id } => write!(
                f,
                "memo {id} cannot be deleted: more than 24 hours have passed since creation and it has not expired yet"
            ),
        }
    }
}

impl Error for MemoLifecycleError {}

/// Entity-level failure returned by rule-enforcing operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoError {
    Validation(MemoValidationError),
    Lifecycle(MemoLifecycleError),
}

impl Display for MemoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Lifecycle(err) => write!(f, "{err}"),
        }
    }
}

impl Error for MemoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Lifecycle(err) => Some(err),
        }
    }
}

impl From<MemoValidationError> for MemoError {
    fn from(value: MemoValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<MemoLifecycleError> for MemoError {
    fn from(value: MemoLifecycleError) -> Self {
        Self::Lifecycle(value)
    }
}

/// Plain memo record exchanged with repositories.
///
/// Carries no bookkeeping from the storage engine; serializes with exactly
/// the `id`, `title`, `content` and `regdate` keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoRecord {
    pub id: MemoId,
    pub title: String,
    pub content: String,
    /// Creation time in epoch milliseconds.
    pub regdate: i64,
}

/// Read model returned to callers: the plain record plus derived fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoView {
    #[serde(flatten)]
    pub record: MemoRecord,
    pub word_count: usize,
    pub can_be_modified: bool,
    pub is_expired: bool,
}

/// Partial update payload. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoPatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl MemoPatch {
    /// Returns whether the patch defines no field at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

/// Validated memo value.
///
/// Built fresh from plain data on every read or mutation; never holds a
/// handle to storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MemoRecord", into = "MemoRecord")]
pub struct Memo {
    id: MemoId,
    title: String,
    content: String,
    regdate: i64,
}

impl Memo {
    /// Creates a brand-new memo with a generated id and the current time.
    pub fn new(title: &str, content: &str) -> Result<Self, MemoValidationError> {
        Self::with_identity(Some(title), Some(content), None, None)
    }

    /// Creates a memo from possibly-missing parts.
    ///
    /// A missing `id` is generated (UUID v4); a missing `regdate` defaults to
    /// the current clock.
    ///
    /// # Errors
    /// - Returns `MissingTitle`/`MissingContent` for absent or blank values.
    /// - Returns `TitleTooLong`/`ContentTooLong` when trimmed lengths exceed
    ///   their bounds.
    pub fn with_identity(
        title: Option<&str>,
        content: Option<&str>,
        id: Option<MemoId>,
        regdate: Option<i64>,
    ) -> Result<Self, MemoValidationError> {
        let title = normalize_title(title)?;
        let content = normalize_content(content)?;
        let id = id
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        Ok(Self {
            id,
            title,
            content,
            regdate: regdate.unwrap_or_else(now_epoch_ms),
        })
    }

    /// Rebuilds a memo from a persisted record, re-checking every invariant.
    pub fn from_record(record: &MemoRecord) -> Result<Self, MemoValidationError> {
        Self::with_identity(
            Some(record.title.as_str()),
            Some(record.content.as_str()),
            Some(record.id.clone()),
            Some(record.regdate),
        )
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn regdate(&self) -> i64 {
        self.regdate
    }

    /// Number of whitespace-delimited tokens in the content.
    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }

    pub fn is_title_valid(&self) -> bool {
        within_bounds(&self.title, TITLE_MAX_CHARS)
    }

    pub fn is_content_valid(&self) -> bool {
        within_bounds(&self.content, CONTENT_MAX_CHARS)
    }

    pub fn can_be_modified(&self) -> bool {
        self.can_be_modified_at(now_epoch_ms())
    }

    /// True while strictly less than 24h have elapsed since `regdate`.
    pub fn can_be_modified_at(&self, now_ms: i64) -> bool {
        now_ms.saturating_sub(self.regdate) < MODIFIABLE_WINDOW_MS
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(now_epoch_ms())
    }

    /// True once strictly more than 30 days have elapsed since `regdate`.
    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        now_ms.saturating_sub(self.regdate) > EXPIRY_WINDOW_MS
    }

    pub fn can_be_deleted(&self) -> bool {
        self.can_be_deleted_at(now_epoch_ms())
    }

    /// Deletion is allowed while modifiable or once expired.
    ///
    /// Memos between 24h and 30d old are not deletable.
    pub fn can_be_deleted_at(&self, now_ms: i64) -> bool {
        self.is_expired_at(now_ms) || self.can_be_modified_at(now_ms)
    }

    pub fn ensure_deletable(&self) -> Result<(), MemoLifecycleError> {
        self.ensure_deletable_at(now_epoch_ms())
    }

    pub fn ensure_deletable_at(&self, now_ms: i64) -> Result<(), MemoLifecycleError> {
        if self.can_be_deleted_at(now_ms) {
            Ok(())
        } else {
            Err(MemoLifecycleError::DeleteWindowClosed {
                id: self.id.clone(),
            })
        }
    }

    /// Returns a new memo with replaced title and/or content.
    ///
    /// Absent values keep the current field; `id` and `regdate` are copied.
    pub fn update_content(
        &self,
        new_title: Option<&str>,
        new_content: Option<&str>,
    ) -> Result<Self, MemoError> {
        self.update_content_at(new_title, new_content, now_epoch_ms())
    }

    pub fn update_content_at(
        &self,
        new_title: Option<&str>,
        new_content: Option<&str>,
        now_ms: i64,
    ) -> Result<Self, MemoError> {
        if !self.can_be_modified_at(now_ms) {
            return Err(MemoLifecycleError::ModifyWindowClosed {
                id: self.id.clone(),
            }
            .into());
        }

        let updated = Self::with_identity(
            Some(new_title.unwrap_or(&self.title)),
            Some(new_content.unwrap_or(&self.content)),
            Some(self.id.clone()),
            Some(self.regdate),
        )?;
        Ok(updated)
    }

    /// Pure conversion to the plain persisted shape.
    pub fn to_record(&self) -> MemoRecord {
        MemoRecord {
            id: self.id.clone(),
            title: self.title.clone(),
            content: self.content.clone(),
            regdate: self.regdate,
        }
    }

    /// Decorates the plain record with derived fields evaluated at `now_ms`.
    pub fn to_view_at(&self, now_ms: i64) -> MemoView {
        MemoView {
            record: self.to_record(),
            word_count: self.word_count(),
            can_be_modified: self.can_be_modified_at(now_ms),
            is_expired: self.is_expired_at(now_ms),
        }
    }

    pub fn to_view(&self) -> MemoView {
        self.to_view_at(now_epoch_ms())
    }
}

impl TryFrom<MemoRecord> for Memo {
    type Error = MemoValidationError;

    fn try_from(value: MemoRecord) -> Result<Self, Self::Error> {
        Self::from_record(&value)
    }
}

impl From<Memo> for MemoRecord {
    fn from(value: Memo) -> Self {
        Self {
            id: value.id,
            title: value.title,
            content: value.content,
            regdate: value.regdate,
        }
    }
}

/// Trims and bounds-checks a title value.
pub fn normalize_title(title: Option<&str>) -> Result<String, MemoValidationError> {
    let trimmed = title.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return Err(MemoValidationError::MissingTitle);
    }
    let chars = trimmed.chars().count();
    if chars > TITLE_MAX_CHARS {
        return Err(MemoValidationError::TitleTooLong { chars });
    }
    Ok(trimmed.to_string())
}

/// Trims and bounds-checks a content value.
pub fn normalize_content(content: Option<&str>) -> Result<String, MemoValidationError> {
    let trimmed = content.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return Err(MemoValidationError::MissingContent);
    }
    let chars = trimmed.chars().count();
    if chars > CONTENT_MAX_CHARS {
        return Err(MemoValidationError::ContentTooLong { chars });
    }
    Ok(trimmed.to_string())
}

fn within_bounds(value: &str, max_chars: usize) -> bool {
    let chars = value.chars().count();
    chars > 0 && chars <= max_chars
}
