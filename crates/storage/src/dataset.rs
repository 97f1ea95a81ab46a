//! Read-only seed data: workout catalog, exercises, users and their history.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use fitness_core::model::{
    Category, Difficulty, Exercise, ExerciseId, LogId, ProgressLog, User, UserId, WorkoutId,
    WorkoutTemplate,
};
use fitness_core::time::fixed_now;

use crate::repository::StorageError;

/// Everything the app treats as process-wide constants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(default)]
    pub workouts: Vec<WorkoutTemplate>,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub progress_logs: Vec<ProgressLog>,
}

impl Dataset {
    /// Parse a dataset from its JSON form.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the document does not match
    /// the dataset shape.
    pub fn from_json(raw: &str) -> Result<Self, StorageError> {
        serde_json::from_str(raw).map_err(|err| StorageError::Serialization(err.to_string()))
    }

    /// Small built-in dataset used when no dataset file is supplied to the app.
    #[must_use]
    pub fn sample() -> Self {
        let now = fixed_now();
        let exercises = vec![
            exercise("ex-1", "Push-ups", Category::Strength, Some(10), Some(60), &["Chest", "Triceps"], &[]),
            exercise("ex-2", "Squats", Category::Strength, Some(12), Some(80), &["Quads", "Glutes"], &[]),
            exercise("ex-3", "Jump Rope", Category::Cardio, Some(15), Some(150), &["Calves"], &["Jump rope"]),
            exercise("ex-4", "Downward Dog", Category::Flexibility, None, Some(20), &["Hamstrings"], &["Mat"]),
            exercise("ex-5", "Burpees", Category::Cardio, Some(8), None, &["Full body"], &[]),
            exercise("ex-6", "Dumbbell Rows", Category::Strength, Some(10), Some(70), &["Back"], &["Dumbbells"]),
        ];

        let workouts = vec![
            workout("1", "Full Body Blast", Category::Strength, Difficulty::Intermediate, 45, 350,
                "Compound movements for total-body strength", &["ex-1", "ex-2", "ex-6"]),
            workout("2", "Cardio Burn", Category::Cardio, Difficulty::Beginner, 30, 300,
                "Quick high-energy intervals", &["ex-3", "ex-5"]),
            workout("3", "Morning Stretch", Category::Flexibility, Difficulty::Beginner, 20, 80,
                "Gentle mobility flow to start the day", &["ex-4"]),
            workout("4", "HIIT Circuit", Category::Cardio, Difficulty::Advanced, 25, 320,
                "Short rest, maximum effort", &["ex-1", "ex-3", "ex-5"]),
        ];

        let alex = UserId::new("1");
        let users = vec![
            User {
                id: alex.clone(),
                name: "Alex Morgan".into(),
                email: "alex@example.com".into(),
                join_date: now - Duration::days(180),
            },
            User {
                id: UserId::new("2"),
                name: "Sam Lee".into(),
                email: "sam@example.com".into(),
                join_date: now - Duration::days(30),
            },
        ];

        let progress_logs = vec![
            history("log-1", &alex, "1", 3, 45, 350, "Felt strong today"),
            history("log-2", &alex, "2", 2, 30, 300, "Good cardio session"),
            history("log-3", &alex, "3", 1, 20, 80, "Nice and relaxing"),
            history("log-4", &UserId::new("2"), "4", 1, 25, 320, "Tough one"),
        ];

        Self {
            workouts,
            exercises,
            users,
            progress_logs,
        }
    }
}

fn exercise(
    id: &str,
    name: &str,
    category: Category,
    duration: Option<u32>,
    calories_burned: Option<u32>,
    target_muscles: &[&str],
    equipment: &[&str],
) -> Exercise {
    Exercise {
        id: ExerciseId::new(id),
        name: name.to_owned(),
        category,
        description: format!("{name} with controlled form"),
        duration,
        calories_burned,
        target_muscles: target_muscles.iter().map(|m| (*m).to_owned()).collect(),
        equipment: equipment.iter().map(|e| (*e).to_owned()).collect(),
        instructions: vec!["Warm up".to_owned(), "Keep a steady pace".to_owned()],
    }
}

#[allow(clippy::too_many_arguments)]
fn workout(
    id: &str,
    name: &str,
    category: Category,
    difficulty: Difficulty,
    duration: u32,
    calories_burned: u32,
    description: &str,
    exercise_ids: &[&str],
) -> WorkoutTemplate {
    WorkoutTemplate {
        id: WorkoutId::new(id),
        name: name.to_owned(),
        category,
        difficulty,
        duration,
        calories_burned,
        description: description.to_owned(),
        exercise_ids: exercise_ids.iter().map(|e| ExerciseId::new(*e)).collect(),
    }
}

fn history(
    id: &str,
    user_id: &UserId,
    workout_id: &str,
    days_ago: i64,
    duration: u32,
    calories_burned: u32,
    notes: &str,
) -> ProgressLog {
    ProgressLog {
        id: LogId::new(id),
        user_id: user_id.clone(),
        workout_id: Some(WorkoutId::new(workout_id)),
        workout_name: None,
        date: fixed_now() - Duration::days(days_ago),
        duration,
        calories_burned,
        completed: true,
        notes: Some(notes.to_owned()),
    }
}
