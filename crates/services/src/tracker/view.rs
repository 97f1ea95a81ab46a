use fitness_core::model::{ActivityView, OngoingSession, ProgressStats, User, WorkoutTemplate};

/// Fallback label for activity that names no workout.
pub const UNNAMED_WORKOUT: &str = "Workout";

/// Presentation-agnostic row of the recent-activity feed.
///
/// No pre-formatted dates; callers format `view.date` as they need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityItem {
    pub view: ActivityView,
    pub display_name: String,
}

impl ActivityItem {
    /// Resolves the label shown for `view`: the catalog name when the
    /// workout id is known, else the logged name, else a generic label.
    #[must_use]
    pub fn resolve(view: ActivityView, catalog: &[WorkoutTemplate]) -> Self {
        let catalog_name = view
            .workout_id
            .as_ref()
            .and_then(|id| catalog.iter().find(|w| w.id == *id))
            .map(|w| w.name.clone());
        let display_name = catalog_name
            .or_else(|| view.workout_name.clone())
            .unwrap_or_else(|| UNNAMED_WORKOUT.to_owned());
        Self { view, display_name }
    }
}

/// Everything the progress page shows for the current tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressOverview {
    pub user: User,
    pub stats: ProgressStats,
    pub ongoing: Vec<OngoingSession>,
    pub recent: Vec<ActivityItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    use fitness_core::model::{Category, Difficulty, LogId, UserId, WorkoutId};
    use fitness_core::time::fixed_now;

    fn view(workout_id: Option<&str>, workout_name: Option<&str>) -> ActivityView {
        ActivityView {
            id: LogId::new("log-1"),
            user_id: UserId::new("1"),
            workout_id: workout_id.map(WorkoutId::new),
            workout_name: workout_name.map(str::to_owned),
            date: fixed_now(),
            duration: 30,
            calories_burned: 200,
            completed: true,
            notes: None,
        }
    }

    fn catalog() -> Vec<WorkoutTemplate> {
        vec![WorkoutTemplate {
            id: WorkoutId::new("1"),
            name: "Full Body Blast".into(),
            category: Category::Strength,
            difficulty: Difficulty::Intermediate,
            duration: 45,
            calories_burned: 350,
            description: String::new(),
            exercise_ids: Vec::new(),
        }]
    }

    #[test]
    fn catalog_name_wins() {
        let item = ActivityItem::resolve(view(Some("1"), Some("Old name")), &catalog());
        assert_eq!(item.display_name, "Full Body Blast");
    }

    #[test]
    fn falls_back_to_logged_name_then_generic() {
        let item = ActivityItem::resolve(view(Some("custom-9"), Some("My Mix")), &catalog());
        assert_eq!(item.display_name, "My Mix");

        let item = ActivityItem::resolve(view(None, None), &catalog());
        assert_eq!(item.display_name, UNNAMED_WORKOUT);
    }
}
