use std::sync::Arc;

use fitness_core::model::{CustomWorkout, CustomWorkoutDraft, DraftTotals, Exercise};
use storage::repository::CatalogRepository;

use crate::Clock;
use crate::error::LogWorkoutError;
use crate::handoff::Handoff;
use crate::navigation::Navigation;

/// Builds custom workouts and hands them to the dashboard.
#[derive(Clone)]
pub struct LogWorkoutService {
    clock: Clock,
    catalog: Arc<dyn CatalogRepository>,
    dashboard: Handoff<CustomWorkout>,
}

impl LogWorkoutService {
    #[must_use]
    pub fn new(
        clock: Clock,
        catalog: Arc<dyn CatalogRepository>,
        dashboard: Handoff<CustomWorkout>,
    ) -> Self {
        Self {
            clock,
            catalog,
            dashboard,
        }
    }

    /// Empty form dated now.
    #[must_use]
    pub fn new_draft(&self) -> CustomWorkoutDraft {
        CustomWorkoutDraft::new(self.clock.now())
    }

    /// Exercises available for selection.
    ///
    /// # Errors
    ///
    /// Returns `LogWorkoutError::Storage` if the catalog cannot be read.
    pub async fn exercises(&self) -> Result<Vec<Exercise>, LogWorkoutError> {
        Ok(self.catalog.list_exercises().await?)
    }

    /// Estimated duration and calories for the current selection.
    ///
    /// # Errors
    ///
    /// Returns `LogWorkoutError::Storage` if the catalog cannot be read.
    pub async fn estimate(&self, draft: &CustomWorkoutDraft) -> Result<DraftTotals, LogWorkoutError> {
        let exercises = self.catalog.list_exercises().await?;
        Ok(draft.totals(&exercises))
    }

    /// Validate the draft and publish the workout to the dashboard.
    ///
    /// On rejection nothing is published.
    ///
    /// # Errors
    ///
    /// Returns `LogWorkoutError::Invalid` for a blank name or empty selection,
    /// `LogWorkoutError::Storage` if the catalog cannot be read.
    pub async fn submit(
        &self,
        draft: &CustomWorkoutDraft,
    ) -> Result<(CustomWorkout, Navigation), LogWorkoutError> {
        let exercises = self.catalog.list_exercises().await?;
        let workout = draft.validate(&exercises, self.clock.now())?;
        tracing::debug!(
            workout = %workout.template.id,
            exercises = workout.template.exercise_ids.len(),
            "custom workout logged"
        );
        self.dashboard.put(workout.clone());
        Ok((workout, Navigation::Dashboard))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use fitness_core::model::{CustomWorkoutError, ExerciseId};
    use fitness_core::time::fixed_clock;
    use storage::Dataset;
    use storage::repository::InMemoryRepository;

    fn service(handoff: &Handoff<CustomWorkout>) -> LogWorkoutService {
        LogWorkoutService::new(
            fixed_clock(),
            Arc::new(InMemoryRepository::with_dataset(Dataset::sample())),
            handoff.clone(),
        )
    }

    #[tokio::test]
    async fn estimate_uses_catalog_values_and_defaults() {
        let handoff = Handoff::new();
        let svc = service(&handoff);
        let mut draft = svc.new_draft();
        // ex-4 has no duration, ex-5 has no calories
        draft.toggle_exercise(ExerciseId::new("ex-4"));
        draft.toggle_exercise(ExerciseId::new("ex-5"));

        let totals = svc.estimate(&draft).await.unwrap();
        assert_eq!(totals.duration, 10 + 8);
        assert_eq!(totals.calories_burned, 20 + 50);
    }

    #[tokio::test]
    async fn rejected_draft_publishes_nothing() {
        let handoff = Handoff::new();
        let svc = service(&handoff);
        let mut draft = svc.new_draft();
        draft.toggle_exercise(ExerciseId::new("ex-1"));

        let err = svc.submit(&draft).await.unwrap_err();
        assert!(matches!(
            err,
            LogWorkoutError::Invalid(CustomWorkoutError::EmptyName)
        ));
        assert!(!handoff.is_pending());

        draft.name = "Push Day".into();
        draft.toggle_exercise(ExerciseId::new("ex-1"));
        let err = svc.submit(&draft).await.unwrap_err();
        assert!(matches!(
            err,
            LogWorkoutError::Invalid(CustomWorkoutError::NoExercises)
        ));
        assert!(!handoff.is_pending());
    }

    #[tokio::test]
    async fn submit_hands_workout_to_dashboard() {
        let handoff = Handoff::new();
        let svc = service(&handoff);
        let mut draft = svc.new_draft();
        draft.name = "Push Day".into();
        draft.toggle_exercise(ExerciseId::new("ex-1"));
        draft.toggle_exercise(ExerciseId::new("ex-6"));

        let (workout, nav) = svc.submit(&draft).await.unwrap();

        assert_eq!(nav, Navigation::Dashboard);
        assert_eq!(workout.template.duration, 20);
        assert_eq!(workout.template.calories_burned, 130);
        assert_eq!(handoff.take(), Some(workout));
        assert_eq!(handoff.take(), None);
    }
}
