mod activity;
mod catalog;
mod custom;
mod ids;
mod session;
mod stats;
mod user;

pub use ids::{ExerciseId, LogId, ParseIdError, UserId, WorkoutId};

pub use activity::{ActivityEntry, ActivityView, merge_recent_activity};
pub use catalog::{CatalogParseError, Category, Difficulty, Exercise, WorkoutFilter, WorkoutTemplate};
pub use custom::{
    CustomWorkout, CustomWorkoutDraft, CustomWorkoutError, DEFAULT_EXERCISE_CALORIES,
    DEFAULT_EXERCISE_MINUTES, DraftTotals,
};
pub use session::{COMPLETED_NOTE, IN_PROGRESS_NOTE, OngoingSession, ProgressLog};
pub use stats::ProgressStats;
pub use user::User;
