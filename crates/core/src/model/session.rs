use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::catalog::WorkoutTemplate;
use crate::model::ids::{LogId, UserId, WorkoutId};

/// Note attached to logs completed during the current tab session.
pub const COMPLETED_NOTE: &str = "Completed";

/// Note attached to the projection of a still-running session.
pub const IN_PROGRESS_NOTE: &str = "In progress (this session only)";

//
// ─── ONGOING SESSION ───────────────────────────────────────────────────────────
//

/// A workout the user has started in this tab but not yet completed.
///
/// The serialized form uses camelCase keys and is what tab storage holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OngoingSession {
    #[serde(default)]
    pub workout_id: Option<WorkoutId>,
    pub workout_name: String,
    pub start_time: DateTime<Utc>,
    pub duration: u32,
    pub calories_burned: u32,
}

impl OngoingSession {
    /// Starts a session for `template` at `started_at`.
    #[must_use]
    pub fn start(template: &WorkoutTemplate, started_at: DateTime<Utc>) -> Self {
        Self {
            workout_id: Some(template.id.clone()),
            workout_name: template.name.clone(),
            start_time: started_at,
            duration: template.duration,
            calories_burned: template.calories_burned,
        }
    }

    /// True when both sessions refer to the same non-null workout.
    #[must_use]
    pub fn same_workout(&self, other: &OngoingSession) -> bool {
        match (&self.workout_id, &other.workout_id) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// Closes the session into a log owned by `user_id`.
    ///
    /// The log is dated at the session start, not at completion.
    #[must_use]
    pub fn complete(self, user_id: UserId) -> ProgressLog {
        ProgressLog {
            id: LogId::new(format!(
                "session-completed-{}",
                self.start_time.to_rfc3339()
            )),
            user_id,
            workout_id: self.workout_id,
            workout_name: Some(self.workout_name),
            date: self.start_time,
            duration: self.duration,
            calories_burned: self.calories_burned,
            completed: true,
            notes: Some(COMPLETED_NOTE.to_owned()),
        }
    }
}

//
// ─── PROGRESS LOG ──────────────────────────────────────────────────────────────
//

/// Record of a finished workout.
///
/// Used both for seeded history and for logs completed during the tab session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressLog {
    pub id: LogId,
    pub user_id: UserId,
    #[serde(default)]
    pub workout_id: Option<WorkoutId>,
    #[serde(default)]
    pub workout_name: Option<String>,
    pub date: DateTime<Utc>,
    pub duration: u32,
    pub calories_burned: u32,
    pub completed: bool,
    #[serde(default)]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, Difficulty, ExerciseId};
    use crate::time::fixed_now;

    fn template(id: &str) -> WorkoutTemplate {
        WorkoutTemplate {
            id: WorkoutId::new(id),
            name: format!("Workout {id}"),
            category: Category::Strength,
            difficulty: Difficulty::Beginner,
            duration: 30,
            calories_burned: 200,
            description: String::new(),
            exercise_ids: vec![ExerciseId::new("ex-1")],
        }
    }

    #[test]
    fn start_copies_template_totals() {
        let session = OngoingSession::start(&template("w1"), fixed_now());
        assert_eq!(session.workout_id, Some(WorkoutId::new("w1")));
        assert_eq!(session.workout_name, "Workout w1");
        assert_eq!(session.duration, 30);
        assert_eq!(session.calories_burned, 200);
        assert_eq!(session.start_time, fixed_now());
    }

    #[test]
    fn complete_dates_log_at_start_time() {
        let session = OngoingSession::start(&template("w1"), fixed_now());
        let log = session.complete(UserId::new("u1"));
        assert!(log.completed);
        assert_eq!(log.date, fixed_now());
        assert_eq!(log.notes.as_deref(), Some(COMPLETED_NOTE));
        assert!(log.id.as_str().starts_with("session-completed-"));
    }

    #[test]
    fn sessions_without_workout_id_never_collide() {
        let mut a = OngoingSession::start(&template("w1"), fixed_now());
        let mut b = a.clone();
        assert!(a.same_workout(&b));
        a.workout_id = None;
        b.workout_id = None;
        assert!(!a.same_workout(&b));
    }

    #[test]
    fn serialized_shape_uses_camel_case() {
        let session = OngoingSession::start(&template("w1"), fixed_now());
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["workoutId"], "w1");
        assert_eq!(json["caloriesBurned"], 200);
        assert!(json["startTime"].is_string());
    }
}
