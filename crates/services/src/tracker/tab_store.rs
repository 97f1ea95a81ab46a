use std::sync::Arc;

use fitness_core::model::OngoingSession;
use storage::repository::{SessionStorage, StorageError};

/// Tab-storage key holding the serialized ongoing-session list.
pub const ONGOING_WORKOUTS_KEY: &str = "ongoingWorkouts";

/// Typed view over the tab store's `ongoingWorkouts` entry.
#[derive(Clone)]
pub(crate) struct OngoingStore {
    storage: Arc<dyn SessionStorage>,
}

impl OngoingStore {
    pub(crate) fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self { storage }
    }

    /// Missing or unparsable content reads as an empty list.
    pub(crate) async fn load(&self) -> Result<Vec<OngoingSession>, StorageError> {
        let Some(raw) = self.storage.get_item(ONGOING_WORKOUTS_KEY).await? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<OngoingSession>>(&raw) {
            Ok(sessions) => Ok(sessions),
            Err(err) => {
                tracing::warn!(
                    key = ONGOING_WORKOUTS_KEY,
                    error = %err,
                    "discarding malformed tab storage"
                );
                Ok(Vec::new())
            }
        }
    }

    pub(crate) async fn save(&self, sessions: &[OngoingSession]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(sessions)
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        self.storage.set_item(ONGOING_WORKOUTS_KEY, &raw).await
    }

    pub(crate) async fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove_item(ONGOING_WORKOUTS_KEY).await
    }
}
