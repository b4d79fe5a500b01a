//! Core use-case services.
//!
//! # Responsibility
//! - Validate caller input before it reaches the entity or repository.
//! - Orchestrate repository calls with memo lifecycle rules.
//! - Keep outer layers (HTTP, CLI) decoupled from storage details.

pub mod read_service;
pub mod validation_service;
pub mod write_service;

use crate::model::memo::{MemoError, MemoLifecycleError, MemoValidationError};
use crate::repo::memo_repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Use-case an error was raised from; rendered as the message prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoOperation {
    List,
    Lookup,
    ListExpired,
    Create,
    Update,
    Delete,
}

impl Display for MemoOperation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::List => "memo list",
            Self::Lookup => "memo lookup",
            Self::ListExpired => "expired memo list",
            Self::Create => "memo creation",
            Self::Update => "memo update",
            Self::Delete => "memo deletion",
        };
        f.write_str(label)
    }
}

/// Service error carrying the failing operation as context.
#[derive(Debug)]
pub enum MemoServiceError {
    /// Caller input or persisted data violates memo rules.
    Validation {
        operation: MemoOperation,
        source: MemoValidationError,
    },
    /// Operation attempted outside its time window.
    Lifecycle {
        operation: MemoOperation,
        source: MemoLifecycleError,
    },
    /// Storage collaborator failure.
    Storage {
        operation: MemoOperation,
        source: RepoError,
    },
}

impl MemoServiceError {
    pub fn operation(&self) -> MemoOperation {
        match self {
            Self::Validation { operation, .. }
            | Self::Lifecycle { operation, .. }
            | Self::Storage { operation, .. } => *operation,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    pub fn is_lifecycle(&self) -> bool {
        matches!(self, Self::Lifecycle { .. })
    }
}

impl Display for MemoServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation { operation, source } => write!(f, "{operation} failed: {source}"),
            Self::Lifecycle { operation, source } => write!(f, "{operation} failed: {source}"),
            Self::Storage { operation, source } => write!(f, "{operation} failed: {source}"),
        }
    }
}

impl Error for MemoServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation { source, .. } => Some(source),
            Self::Lifecycle { source, .. } => Some(source),
            Self::Storage { source, .. } => Some(source),
        }
    }
}

/// Attaches operation context to lower-layer failures.
pub(crate) trait WithOperation<T> {
    fn during(self, operation: MemoOperation) -> Result<T, MemoServiceError>;
}

impl<T> WithOperation<T> for Result<T, RepoError> {
    fn during(self, operation: MemoOperation) -> Result<T, MemoServiceError> {
        self.map_err(|source| MemoServiceError::Storage { operation, source })
    }
}

impl<T> WithOperation<T> for Result<T, MemoValidationError> {
    fn during(self, operation: MemoOperation) -> Result<T, MemoServiceError> {
        self.map_err(|source| MemoServiceError::Validation { operation, source })
    }
}

impl<T> WithOperation<T> for Result<T, MemoLifecycleError> {
    fn during(self, operation: MemoOperation) -> Result<T, MemoServiceError> {
        self.map_err(|source| MemoServiceError::Lifecycle { operation, source })
    }
}

impl<T> WithOperation<T> for Result<T, MemoError> {
    fn during(self, operation: MemoOperation) -> Result<T, MemoServiceError> {
        self.map_err(|err| match err {
            MemoError::Validation(source) => MemoServiceError::Validation { operation, source },
            MemoError::Lifecycle(source) => MemoServiceError::Lifecycle { operation, source },
        })
    }
}

/// Rejects blank memo ids before any repository call.
pub(crate) fn require_id(id: &str, operation: MemoOperation) -> Result<&str, MemoServiceError> {
    if id.trim().is_empty() {
        return Err(MemoServiceError::Validation {
            operation,
            source: MemoValidationError::MissingId,
        });
    }
    Ok(id)
}
