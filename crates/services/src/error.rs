//! Shared error types for the services crate.

use thiserror::Error;

use fitness_core::model::{CustomWorkoutError, UserId};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `SessionTracker`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TrackerError {
    #[error("unknown user: {0}")]
    UnknownUser(UserId),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `CatalogService` and `Dashboard`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `LogWorkoutService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LogWorkoutError {
    #[error(transparent)]
    Invalid(#[from] CustomWorkoutError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error("dataset has no users")]
    NoUsers,
    #[error("unknown user: {0}")]
    UnknownUser(UserId),
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
