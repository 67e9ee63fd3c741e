//! Shared error types for the services crate.

use thiserror::Error;

use english_core::SessionStepError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by the HTTP backend.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("backend request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("invalid backend base url {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl ApiError {
    /// True when the backend answered 404.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            ApiError::HttpStatus(status) => *status == reqwest::StatusCode::NOT_FOUND,
            ApiError::Http(err) => err.status() == Some(reqwest::StatusCode::NOT_FOUND),
            ApiError::InvalidBaseUrl { .. } => false,
        }
    }
}

/// Errors emitted by `CatalogService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: u64 },
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted by `LessonService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LessonServiceError {
    #[error(transparent)]
    Step(#[from] SessionStepError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Errors emitted while pushing the local ledger to the backend.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SyncError {
    #[error("uploading lesson {lesson_id} failed after {uploaded} of {total} records: {source}")]
    Upload {
        lesson_id: u64,
        uploaded: usize,
        total: usize,
        #[source]
        source: ApiError,
    },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Api(#[from] ApiError),
}
