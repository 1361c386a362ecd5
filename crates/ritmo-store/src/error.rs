//! # Store Error Types
//!
//! Error types for repository operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds path, operation and categorization    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in HTTP app) ← Status code + JSON body                      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use ritmo_core::CoreError;
use thiserror::Error;

/// Repository operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing document could not be read or written.
    ///
    /// ## When This Occurs
    /// - File doesn't exist and `create_if_missing` is off
    /// - File permissions issue
    /// - Disk full during the rewrite
    #[error("storage unavailable ({operation} {}): {source}", .path.display())]
    StorageUnavailable {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stored bytes don't match the document schema.
    #[error("storage document {} is malformed: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The in-memory document could not be serialized.
    #[error("failed to encode storage document: {0}")]
    Encode(#[source] serde_json::Error),

    /// Entity not found by exact-key lookup.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The write would break a repository invariant.
    ///
    /// ## When This Occurs
    /// - Creating a second offer for a company that already has one
    #[error("{0}")]
    Conflict(String),

    /// Domain rule violation raised while building an entity.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub(crate) fn io(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::StorageUnavailable {
            operation,
            path: path.into(),
            source,
        }
    }

    /// Whether the error concerns the backing file rather than the request.
    pub fn is_storage_failure(&self) -> bool {
        matches!(
            self,
            StoreError::StorageUnavailable { .. } | StoreError::Decode { .. } | StoreError::Encode(_)
        )
    }
}

/// Result type for repository operations.
pub type StoreResult<T> = Result<T, StoreError>;
