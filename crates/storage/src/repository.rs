use async_trait::async_trait;
use fitness_core::model::{
    Exercise, ExerciseId, ProgressLog, User, UserId, WorkoutId, WorkoutTemplate,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::dataset::Dataset;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// String key/value store scoped to a single tab session.
///
/// Values are opaque to the store; callers own their encoding.
#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be reached.
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be written.
    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be reached.
    async fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Read-only access to workout templates and exercise definitions.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// List all workout templates in catalog order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn list_workouts(&self) -> Result<Vec<WorkoutTemplate>, StorageError>;

    /// Fetch a workout template by ID, `Ok(None)` when absent.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn get_workout(&self, id: &WorkoutId) -> Result<Option<WorkoutTemplate>, StorageError>;

    /// List all exercises in catalog order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn list_exercises(&self) -> Result<Vec<Exercise>, StorageError>;

    /// Fetch an exercise by ID, `Ok(None)` when absent.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn get_exercise(&self, id: &ExerciseId) -> Result<Option<Exercise>, StorageError>;
}

#[async_trait]
pub trait ProgressLogRepository: Send + Sync {
    /// Permanent history for `user_id`, in dataset order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn list_logs_for_user(&self, user_id: &UserId) -> Result<Vec<ProgressLog>, StorageError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by ID, `Ok(None)` when absent.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn get_user(&self, id: &UserId) -> Result<Option<User>, StorageError>;

    /// List all known users.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn list_users(&self) -> Result<Vec<User>, StorageError>;
}

/// In-memory repository over a fixed dataset plus a mutable tab store.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    dataset: Arc<Dataset>,
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryRepository {
    /// Empty catalog, empty history, empty tab store.
    #[must_use]
    pub fn new() -> Self {
        Self::with_dataset(Dataset::default())
    }

    #[must_use]
    pub fn with_dataset(dataset: Dataset) -> Self {
        Self {
            dataset: Arc::new(dataset),
            items: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl SessionStorage for InMemoryRepository {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .items
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self
            .items
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut guard = self
            .items
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(key);
        Ok(())
    }
}

#[async_trait]
impl CatalogRepository for InMemoryRepository {
    async fn list_workouts(&self) -> Result<Vec<WorkoutTemplate>, StorageError> {
        Ok(self.dataset.workouts.clone())
    }

    async fn get_workout(&self, id: &WorkoutId) -> Result<Option<WorkoutTemplate>, StorageError> {
        Ok(self.dataset.workouts.iter().find(|w| w.id == *id).cloned())
    }

    async fn list_exercises(&self) -> Result<Vec<Exercise>, StorageError> {
        Ok(self.dataset.exercises.clone())
    }

    async fn get_exercise(&self, id: &ExerciseId) -> Result<Option<Exercise>, StorageError> {
        Ok(self.dataset.exercises.iter().find(|e| e.id == *id).cloned())
    }
}

#[async_trait]
impl ProgressLogRepository for InMemoryRepository {
    async fn list_logs_for_user(&self, user_id: &UserId) -> Result<Vec<ProgressLog>, StorageError> {
        Ok(self
            .dataset
            .progress_logs
            .iter()
            .filter(|log| log.user_id == *user_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn get_user(&self, id: &UserId) -> Result<Option<User>, StorageError> {
        Ok(self.dataset.users.iter().find(|u| u.id == *id).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, StorageError> {
        Ok(self.dataset.users.clone())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub session: Arc<dyn SessionStorage>,
    pub catalog: Arc<dyn CatalogRepository>,
    pub progress_logs: Arc<dyn ProgressLogRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory(dataset: Dataset) -> Self {
        let repo = InMemoryRepository::with_dataset(dataset);
        let session: Arc<dyn SessionStorage> = Arc::new(repo.clone());
        let catalog: Arc<dyn CatalogRepository> = Arc::new(repo.clone());
        let progress_logs: Arc<dyn ProgressLogRepository> = Arc::new(repo.clone());
        let users: Arc<dyn UserRepository> = Arc::new(repo);
        Self {
            session,
            catalog,
            progress_logs,
            users,
        }
    }
}
