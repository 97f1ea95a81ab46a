use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::catalog::{Category, Difficulty, Exercise, WorkoutTemplate};
use crate::model::ids::{ExerciseId, WorkoutId};

/// Minutes assumed for an exercise with no duration of its own.
pub const DEFAULT_EXERCISE_MINUTES: u32 = 10;

/// Calories assumed for an exercise with no estimate of its own.
pub const DEFAULT_EXERCISE_CALORIES: u32 = 50;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CustomWorkoutError {
    #[error("Please enter a workout name")]
    EmptyName,

    #[error("Please select at least one exercise")]
    NoExercises,
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Form state for logging a user-assembled workout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomWorkoutDraft {
    pub name: String,
    pub selected: Vec<ExerciseId>,
    pub date: DateTime<Utc>,
}

/// Estimated totals for the current selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DraftTotals {
    pub duration: u32,
    pub calories_burned: u32,
}

impl CustomWorkoutDraft {
    #[must_use]
    pub fn new(date: DateTime<Utc>) -> Self {
        Self {
            name: String::new(),
            selected: Vec::new(),
            date,
        }
    }

    /// Adds the exercise if absent, removes it otherwise.
    pub fn toggle_exercise(&mut self, id: ExerciseId) {
        if let Some(pos) = self.selected.iter().position(|selected| *selected == id) {
            self.selected.remove(pos);
        } else {
            self.selected.push(id);
        }
    }

    #[must_use]
    pub fn is_selected(&self, id: &ExerciseId) -> bool {
        self.selected.contains(id)
    }

    /// Sums per-exercise estimates, using the defaults for unknown ids and
    /// for fields that are missing or zero.
    #[must_use]
    pub fn totals(&self, exercises: &[Exercise]) -> DraftTotals {
        self.selected
            .iter()
            .fold(DraftTotals::default(), |acc, id| {
                let exercise = exercises.iter().find(|exercise| exercise.id == *id);
                let minutes = exercise
                    .and_then(|e| e.duration)
                    .filter(|&m| m > 0)
                    .unwrap_or(DEFAULT_EXERCISE_MINUTES);
                let calories = exercise
                    .and_then(|e| e.calories_burned)
                    .filter(|&c| c > 0)
                    .unwrap_or(DEFAULT_EXERCISE_CALORIES);
                DraftTotals {
                    duration: acc.duration.saturating_add(minutes),
                    calories_burned: acc.calories_burned.saturating_add(calories),
                }
            })
    }

    /// Selected exercises that exist in the catalog, in selection order.
    #[must_use]
    pub fn selected_exercises<'a>(&self, exercises: &'a [Exercise]) -> Vec<&'a Exercise> {
        self.selected
            .iter()
            .filter_map(|id| exercises.iter().find(|exercise| exercise.id == *id))
            .collect()
    }

    /// Validates the form and builds the workout to hand to the dashboard.
    ///
    /// # Errors
    ///
    /// Returns `CustomWorkoutError::EmptyName` for a blank name, then
    /// `CustomWorkoutError::NoExercises` when nothing is selected.
    pub fn validate(
        &self,
        exercises: &[Exercise],
        now: DateTime<Utc>,
    ) -> Result<CustomWorkout, CustomWorkoutError> {
        if self.name.trim().is_empty() {
            return Err(CustomWorkoutError::EmptyName);
        }
        if self.selected.is_empty() {
            return Err(CustomWorkoutError::NoExercises);
        }

        let totals = self.totals(exercises);
        let template = WorkoutTemplate {
            id: WorkoutId::new(format!("custom-{}", now.timestamp_millis())),
            name: self.name.clone(),
            category: Category::Strength,
            difficulty: Difficulty::Intermediate,
            duration: totals.duration,
            calories_burned: totals.calories_burned,
            description: format!("Custom workout with {} exercises", self.selected.len()),
            exercise_ids: self.selected.clone(),
        };

        Ok(CustomWorkout {
            template,
            date: self.date,
        })
    }
}

//
// ─── CUSTOM WORKOUT ────────────────────────────────────────────────────────────
//

/// A validated custom workout plus the date the user picked for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomWorkout {
    pub template: WorkoutTemplate,
    pub date: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn exercise(id: &str, duration: Option<u32>, calories: Option<u32>) -> Exercise {
        Exercise {
            id: ExerciseId::new(id),
            name: format!("Exercise {id}"),
            category: Category::Strength,
            description: String::new(),
            duration,
            calories_burned: calories,
            target_muscles: Vec::new(),
            equipment: Vec::new(),
            instructions: Vec::new(),
        }
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut draft = CustomWorkoutDraft::new(fixed_now());
        draft.toggle_exercise(ExerciseId::new("a"));
        draft.toggle_exercise(ExerciseId::new("b"));
        draft.toggle_exercise(ExerciseId::new("a"));
        assert_eq!(draft.selected, vec![ExerciseId::new("b")]);
    }

    #[test]
    fn totals_fall_back_to_defaults() {
        let catalog = vec![exercise("a", Some(15), Some(120)), exercise("b", None, None)];
        let mut draft = CustomWorkoutDraft::new(fixed_now());
        draft.toggle_exercise(ExerciseId::new("a"));
        draft.toggle_exercise(ExerciseId::new("b"));
        draft.toggle_exercise(ExerciseId::new("missing"));

        let totals = draft.totals(&catalog);
        assert_eq!(totals.duration, 15 + 10 + 10);
        assert_eq!(totals.calories_burned, 120 + 50 + 50);
        assert_eq!(draft.selected_exercises(&catalog).len(), 2);
    }

    #[test]
    fn zero_estimates_count_as_missing() {
        let catalog = vec![exercise("z", Some(0), Some(0)), exercise("a", Some(5), Some(0))];
        let mut draft = CustomWorkoutDraft::new(fixed_now());
        draft.toggle_exercise(ExerciseId::new("z"));
        draft.toggle_exercise(ExerciseId::new("a"));

        let totals = draft.totals(&catalog);
        assert_eq!(totals.duration, 10 + 5);
        assert_eq!(totals.calories_burned, 50 + 50);
    }

    #[test]
    fn blank_name_is_rejected_before_selection() {
        let draft = CustomWorkoutDraft {
            name: "   ".into(),
            ..CustomWorkoutDraft::new(fixed_now())
        };
        assert_eq!(
            draft.validate(&[], fixed_now()).unwrap_err(),
            CustomWorkoutError::EmptyName
        );
    }

    #[test]
    fn empty_selection_is_rejected() {
        let draft = CustomWorkoutDraft {
            name: "Upper Body".into(),
            ..CustomWorkoutDraft::new(fixed_now())
        };
        assert_eq!(
            draft.validate(&[], fixed_now()).unwrap_err(),
            CustomWorkoutError::NoExercises
        );
    }

    #[test]
    fn validate_builds_strength_template() {
        let catalog = vec![exercise("a", Some(12), Some(80))];
        let mut draft = CustomWorkoutDraft {
            name: "Morning Session".into(),
            ..CustomWorkoutDraft::new(fixed_now())
        };
        draft.toggle_exercise(ExerciseId::new("a"));

        let custom = draft.validate(&catalog, fixed_now()).unwrap();
        assert_eq!(custom.template.id.as_str(), "custom-1700000000000");
        assert_eq!(custom.template.category, Category::Strength);
        assert_eq!(custom.template.difficulty, Difficulty::Intermediate);
        assert_eq!(custom.template.duration, 12);
        assert_eq!(custom.template.calories_burned, 80);
        assert_eq!(
            custom.template.description,
            "Custom workout with 1 exercises"
        );
        assert_eq!(custom.date, fixed_now());
    }
}
