use std::sync::Arc;

use fitness_core::model::{CustomWorkout, Exercise, ExerciseId, WorkoutFilter, WorkoutId, WorkoutTemplate};
use storage::repository::CatalogRepository;

use crate::error::CatalogServiceError;
use crate::handoff::Handoff;

/// A workout together with the catalog exercises it lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutDetails {
    pub workout: WorkoutTemplate,
    pub exercises: Vec<Exercise>,
}

/// Filtered dashboard listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutListing {
    pub workouts: Vec<WorkoutTemplate>,
    /// Size of the unfiltered list, custom workout included.
    pub total: usize,
    pub has_custom: bool,
}

/// Read-only queries over the workout catalog.
#[derive(Clone)]
pub struct CatalogService {
    catalog: Arc<dyn CatalogRepository>,
}

impl CatalogService {
    #[must_use]
    pub fn new(catalog: Arc<dyn CatalogRepository>) -> Self {
        Self { catalog }
    }

    /// Catalog workouts plus an optional custom one, filtered.
    ///
    /// # Errors
    ///
    /// Returns `CatalogServiceError::Storage` if the catalog cannot be read.
    pub async fn browse(
        &self,
        filter: &WorkoutFilter,
        custom: Option<&WorkoutTemplate>,
    ) -> Result<WorkoutListing, CatalogServiceError> {
        let mut all = self.catalog.list_workouts().await?;
        if let Some(custom) = custom {
            all.push(custom.clone());
        }
        let total = all.len();
        let workouts = all.into_iter().filter(|w| filter.matches(w)).collect();
        Ok(WorkoutListing {
            workouts,
            total,
            has_custom: custom.is_some(),
        })
    }

    /// Details for a catalog workout, `Ok(None)` when the id is unknown.
    ///
    /// # Errors
    ///
    /// Returns `CatalogServiceError::Storage` if the catalog cannot be read.
    pub async fn workout_details(
        &self,
        id: &WorkoutId,
    ) -> Result<Option<WorkoutDetails>, CatalogServiceError> {
        let Some(workout) = self.catalog.get_workout(id).await? else {
            return Ok(None);
        };
        let exercises = self
            .catalog
            .list_exercises()
            .await?
            .into_iter()
            .filter(|exercise| workout.includes_exercise(&exercise.id))
            .collect();
        Ok(Some(WorkoutDetails { workout, exercises }))
    }

    /// Fetch an exercise, `Ok(None)` when the id is unknown.
    ///
    /// # Errors
    ///
    /// Returns `CatalogServiceError::Storage` if the catalog cannot be read.
    pub async fn exercise(&self, id: &ExerciseId) -> Result<Option<Exercise>, CatalogServiceError> {
        Ok(self.catalog.get_exercise(id).await?)
    }

    /// Open the dashboard, consuming any custom workout handed over by the
    /// log-workout flow. The workout stays visible for this dashboard only.
    #[must_use]
    pub fn open_dashboard(&self, incoming: &Handoff<CustomWorkout>) -> Dashboard {
        let custom = incoming.take();
        if let Some(custom) = custom.as_ref() {
            tracing::debug!(workout = %custom.template.id, "dashboard received custom workout");
        }
        Dashboard {
            catalog: self.clone(),
            custom,
        }
    }
}

/// One visit to the dashboard.
#[derive(Clone)]
pub struct Dashboard {
    catalog: CatalogService,
    custom: Option<CustomWorkout>,
}

impl Dashboard {
    #[must_use]
    pub fn custom(&self) -> Option<&CustomWorkout> {
        self.custom.as_ref()
    }

    /// # Errors
    ///
    /// Returns `CatalogServiceError::Storage` if the catalog cannot be read.
    pub async fn browse(&self, filter: &WorkoutFilter) -> Result<WorkoutListing, CatalogServiceError> {
        self.catalog
            .browse(filter, self.custom.as_ref().map(|c| &c.template))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use fitness_core::model::{Category, CustomWorkoutDraft, Difficulty};
    use fitness_core::time::fixed_now;
    use storage::Dataset;
    use storage::repository::InMemoryRepository;

    fn service() -> CatalogService {
        CatalogService::new(Arc::new(InMemoryRepository::with_dataset(Dataset::sample())))
    }

    fn custom_workout() -> CustomWorkout {
        let mut draft = CustomWorkoutDraft {
            name: "Garage Strength".into(),
            ..CustomWorkoutDraft::new(fixed_now())
        };
        draft.toggle_exercise(ExerciseId::new("ex-2"));
        draft.validate(&[], fixed_now()).unwrap()
    }

    #[tokio::test]
    async fn browse_filters_and_counts() {
        let svc = service();
        let filter = WorkoutFilter::new().with_category(Some(Category::Cardio));
        let listing = svc.browse(&filter, None).await.unwrap();

        assert_eq!(listing.total, 4);
        assert_eq!(listing.workouts.len(), 2);
        assert!(!listing.has_custom);

        let filter = WorkoutFilter::new()
            .with_category(Some(Category::Cardio))
            .with_difficulty(Some(Difficulty::Advanced));
        let listing = svc.browse(&filter, None).await.unwrap();
        assert_eq!(listing.workouts.len(), 1);
        assert_eq!(listing.workouts[0].name, "HIIT Circuit");
    }

    #[tokio::test]
    async fn browse_includes_custom_workout() {
        let svc = service();
        let custom = custom_workout();
        let listing = svc
            .browse(&WorkoutFilter::new().with_query("garage"), Some(&custom.template))
            .await
            .unwrap();

        assert_eq!(listing.total, 5);
        assert!(listing.has_custom);
        assert_eq!(listing.workouts.len(), 1);
        assert_eq!(listing.workouts[0].id, custom.template.id);
    }

    #[tokio::test]
    async fn details_list_only_referenced_exercises() {
        let svc = service();
        let details = svc.workout_details(&WorkoutId::new("2")).await.unwrap().unwrap();
        let ids: Vec<_> = details.exercises.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["ex-3", "ex-5"]);
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() {
        let svc = service();
        assert!(svc.workout_details(&WorkoutId::new("nope")).await.unwrap().is_none());
        assert!(svc.exercise(&ExerciseId::new("nope")).await.unwrap().is_none());
        assert!(svc.exercise(&ExerciseId::new("ex-1")).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn dashboard_consumes_handoff_once() {
        let svc = service();
        let handoff = Handoff::new();
        handoff.put(custom_workout());

        let first = svc.open_dashboard(&handoff);
        assert!(first.custom().is_some());
        let listing = first.browse(&WorkoutFilter::new()).await.unwrap();
        assert_eq!(listing.total, 5);

        let second = svc.open_dashboard(&handoff);
        assert!(second.custom().is_none());
        assert_eq!(second.browse(&WorkoutFilter::new()).await.unwrap().total, 4);
    }
}
