use crate::model::session::ProgressLog;

/// Lifetime totals for a user's progress page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressStats {
    pub total_workouts: u32,
    pub total_minutes: u64,
    pub total_calories: u64,
    pub average_calories_per_workout: u64,
}

impl ProgressStats {
    /// Sums durations and calories over `logs`.
    ///
    /// The average is rounded half up; with no logs every field is zero.
    #[must_use]
    pub fn from_logs(logs: &[ProgressLog]) -> Self {
        let total_workouts = u32::try_from(logs.len()).unwrap_or(u32::MAX);
        let total_minutes = logs.iter().map(|log| u64::from(log.duration)).sum();
        let total_calories: u64 = logs.iter().map(|log| u64::from(log.calories_burned)).sum();

        let average_calories_per_workout = if total_workouts > 0 {
            let count = u64::from(total_workouts);
            (total_calories * 2 + count) / (count * 2)
        } else {
            0
        };

        Self {
            total_workouts,
            total_minutes,
            total_calories,
            average_calories_per_workout,
        }
    }
}
