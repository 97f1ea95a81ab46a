use std::sync::Arc;

use fitness_core::model::{CustomWorkout, UserId};
use storage::Dataset;
use storage::repository::{Storage, UserRepository};

use crate::Clock;
use crate::catalog_service::{CatalogService, Dashboard};
use crate::error::{AppServicesError, TrackerError};
use crate::handoff::Handoff;
use crate::log_workout_service::LogWorkoutService;
use crate::tracker::SessionTracker;

/// Assembles app-facing services and resolves the current user.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    user_id: UserId,
    storage: Storage,
    catalog: Arc<CatalogService>,
    log_workout: Arc<LogWorkoutService>,
    dashboard_handoff: Handoff<CustomWorkout>,
}

impl AppServices {
    /// Build services over an already assembled `Storage`.
    ///
    /// `preferred_user` falls back to the first known user when `None`.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::UnknownUser` for an unknown preferred user,
    /// `AppServicesError::NoUsers` when no user exists at all.
    pub async fn new(
        storage: Storage,
        clock: Clock,
        preferred_user: Option<UserId>,
    ) -> Result<Self, AppServicesError> {
        let user_id = resolve_user(storage.users.as_ref(), preferred_user).await?;
        let dashboard_handoff = Handoff::new();
        let catalog = Arc::new(CatalogService::new(Arc::clone(&storage.catalog)));
        let log_workout = Arc::new(LogWorkoutService::new(
            clock,
            Arc::clone(&storage.catalog),
            dashboard_handoff.clone(),
        ));

        Ok(Self {
            clock,
            user_id,
            storage,
            catalog,
            log_workout,
            dashboard_handoff,
        })
    }

    /// Build services whose tab store is `SQLite`.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization or user
    /// resolution fails.
    pub async fn new_sqlite(
        db_url: &str,
        dataset: Dataset,
        clock: Clock,
        preferred_user: Option<UserId>,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url, dataset).await?;
        Self::new(storage, clock, preferred_user).await
    }

    /// Build services entirely in memory.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if user resolution fails.
    pub async fn new_in_memory(
        dataset: Dataset,
        clock: Clock,
        preferred_user: Option<UserId>,
    ) -> Result<Self, AppServicesError> {
        Self::new(Storage::in_memory(dataset), clock, preferred_user).await
    }

    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    #[must_use]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<CatalogService> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn log_workout(&self) -> Arc<LogWorkoutService> {
        Arc::clone(&self.log_workout)
    }

    /// Open the dashboard, consuming any pending custom workout.
    #[must_use]
    pub fn open_dashboard(&self) -> Dashboard {
        self.catalog.open_dashboard(&self.dashboard_handoff)
    }

    /// Activate the tracker for the current tab.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::Storage` if the tab store cannot be read.
    pub async fn open_tracker(&self) -> Result<SessionTracker, TrackerError> {
        SessionTracker::open(
            self.clock,
            self.user_id.clone(),
            Arc::clone(&self.storage.session),
            Arc::clone(&self.storage.progress_logs),
        )
        .await
    }
}

async fn resolve_user(
    users: &dyn UserRepository,
    preferred: Option<UserId>,
) -> Result<UserId, AppServicesError> {
    if let Some(id) = preferred {
        return match users.get_user(&id).await? {
            Some(user) => Ok(user.id),
            None => Err(AppServicesError::UnknownUser(id)),
        };
    }

    users
        .list_users()
        .await?
        .into_iter()
        .next()
        .map(|user| user.id)
        .ok_or(AppServicesError::NoUsers)
}
