use std::sync::Arc;

use fitness_core::model::{
    ActivityView, OngoingSession, ProgressLog, ProgressStats, UserId, WorkoutId, WorkoutTemplate,
    merge_recent_activity,
};
use storage::repository::{CatalogRepository, ProgressLogRepository, SessionStorage, UserRepository};

use super::tab_store::OngoingStore;
use super::view::{ActivityItem, ProgressOverview};
use crate::Clock;
use crate::error::TrackerError;
use crate::navigation::Navigation;

/// Default size of the recent-activity feed.
pub const RECENT_ACTIVITY_LIMIT: usize = 5;

/// Workouts in progress for one tab, plus the logs completed in it.
///
/// The ongoing list is mirrored to tab storage after every change. One
/// tracker is expected per tab: starts merge with the stored list, but
/// completions act on this tracker's copy. Logs
/// completed here live only in memory and never reach the permanent
/// history, so `aggregate_stats` does not count them.
pub struct SessionTracker {
    clock: Clock,
    user_id: UserId,
    store: OngoingStore,
    history: Arc<dyn ProgressLogRepository>,
    ongoing: Vec<OngoingSession>,
    session_completed: Vec<ProgressLog>,
}

impl SessionTracker {
    /// Activate a tracker for `user_id`, loading any sessions already in
    /// tab storage.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::Storage` if the tab store cannot be read.
    /// Malformed stored content is not an error and yields an empty list.
    pub async fn open(
        clock: Clock,
        user_id: UserId,
        tab: Arc<dyn SessionStorage>,
        history: Arc<dyn ProgressLogRepository>,
    ) -> Result<Self, TrackerError> {
        let store = OngoingStore::new(tab);
        let ongoing = store.load().await?;
        tracing::info!(user = %user_id, ongoing = ongoing.len(), "tab session opened");
        Ok(Self {
            clock,
            user_id,
            store,
            history,
            ongoing,
            session_completed: Vec::new(),
        })
    }

    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Sessions currently in progress, in start order.
    #[must_use]
    pub fn ongoing(&self) -> &[OngoingSession] {
        &self.ongoing
    }

    /// Logs completed in this tab, most recent completion first.
    #[must_use]
    pub fn session_completed(&self) -> &[ProgressLog] {
        &self.session_completed
    }

    /// Start `template` now, replacing any running session of the same workout.
    ///
    /// The ongoing list is re-read from tab storage first, so sessions
    /// started through another tracker on the same store are kept.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::Storage` if tab storage cannot be read or the
    /// updated list cannot be persisted.
    pub async fn start_workout(&mut self, template: &WorkoutTemplate) -> Result<(), TrackerError> {
        let session = OngoingSession::start(template, self.clock.now());
        let mut next: Vec<OngoingSession> = self
            .store
            .load()
            .await?
            .into_iter()
            .filter(|existing| !existing.same_workout(&session))
            .collect();
        next.push(session);

        self.store.save(&next).await?;
        tracing::debug!(workout = %template.id, ongoing = next.len(), "workout started");
        self.ongoing = next;
        Ok(())
    }

    /// Look up `workout_id` in the catalog and start it.
    ///
    /// Returns `Ok(None)` without touching state when the workout does not
    /// exist, otherwise the view to navigate to.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::Storage` on catalog or tab storage failures.
    pub async fn start_workout_by_id(
        &mut self,
        workout_id: &WorkoutId,
        catalog: &dyn CatalogRepository,
    ) -> Result<Option<Navigation>, TrackerError> {
        let Some(template) = catalog.get_workout(workout_id).await? else {
            tracing::debug!(workout = %workout_id, "start requested for unknown workout");
            return Ok(None);
        };
        self.start_workout(&template).await?;
        Ok(Some(Navigation::Progress))
    }

    /// Move the session at `index` into this tab's completed logs.
    ///
    /// Returns the new log, or `Ok(None)` with no state change and no
    /// storage write when `index` is out of range.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::Storage` if the reduced list cannot be persisted;
    /// in that case the tracker state is left unchanged.
    pub async fn complete_workout(
        &mut self,
        index: usize,
    ) -> Result<Option<ProgressLog>, TrackerError> {
        if index >= self.ongoing.len() {
            tracing::debug!(index, ongoing = self.ongoing.len(), "complete ignored: index out of range");
            return Ok(None);
        }

        let mut remaining = self.ongoing.clone();
        let session = remaining.remove(index);
        self.store.save(&remaining).await?;

        let log = session.complete(self.user_id.clone());
        tracing::debug!(log = %log.id, remaining = remaining.len(), "workout completed");
        self.ongoing = remaining;
        self.session_completed.insert(0, log.clone());
        Ok(Some(log))
    }

    /// Newest-first feed over this tab's completed and running sessions and
    /// the user's history, at most `limit` entries.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::Storage` if history cannot be loaded.
    pub async fn recent_activity(&self, limit: usize) -> Result<Vec<ActivityView>, TrackerError> {
        let history = self.history.list_logs_for_user(&self.user_id).await?;
        let entries = merge_recent_activity(&self.session_completed, &self.ongoing, &history, limit);
        Ok(entries
            .iter()
            .map(|entry| entry.view(&self.user_id))
            .collect())
    }

    /// Lifetime totals over the user's permanent history only.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::Storage` if history cannot be loaded.
    pub async fn aggregate_stats(&self) -> Result<ProgressStats, TrackerError> {
        let history = self.history.list_logs_for_user(&self.user_id).await?;
        Ok(ProgressStats::from_logs(&history))
    }

    /// Assemble the progress page: profile, totals, running sessions and
    /// the recent feed with resolved workout names.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::UnknownUser` if the profile is missing, or
    /// `TrackerError::Storage` on repository failures.
    pub async fn overview(
        &self,
        users: &dyn UserRepository,
        catalog: &dyn CatalogRepository,
        limit: usize,
    ) -> Result<ProgressOverview, TrackerError> {
        let user = users
            .get_user(&self.user_id)
            .await?
            .ok_or_else(|| TrackerError::UnknownUser(self.user_id.clone()))?;
        let stats = self.aggregate_stats().await?;
        let workouts = catalog.list_workouts().await?;
        let recent = self
            .recent_activity(limit)
            .await?
            .into_iter()
            .map(|view| ActivityItem::resolve(view, &workouts))
            .collect();

        Ok(ProgressOverview {
            user,
            stats,
            ongoing: self.ongoing.clone(),
            recent,
        })
    }

    /// Tear down the tab session: drop the stored ongoing list and forget
    /// this tab's completed logs.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::Storage` if the tab store cannot be cleared.
    pub async fn close(self) -> Result<(), TrackerError> {
        self.store.clear().await?;
        tracing::info!(
            user = %self.user_id,
            dropped_ongoing = self.ongoing.len(),
            dropped_completed = self.session_completed.len(),
            "tab session closed"
        );
        Ok(())
    }
}
