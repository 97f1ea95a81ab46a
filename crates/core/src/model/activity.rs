use chrono::{DateTime, Utc};

use crate::model::ids::{LogId, UserId, WorkoutId};
use crate::model::session::{IN_PROGRESS_NOTE, OngoingSession, ProgressLog};

/// One row of the recent-activity feed, tagged by where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityEntry<'a> {
    /// Completed earlier in this tab session.
    SessionCompleted(&'a ProgressLog),
    /// Still running; `index` is its position in the ongoing list.
    InProgress {
        index: usize,
        session: &'a OngoingSession,
    },
    /// Seeded history for the user.
    Historical(&'a ProgressLog),
}

/// Display fields shared by every activity source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityView {
    pub id: LogId,
    pub user_id: UserId,
    pub workout_id: Option<WorkoutId>,
    pub workout_name: Option<String>,
    pub date: DateTime<Utc>,
    pub duration: u32,
    pub calories_burned: u32,
    pub completed: bool,
    pub notes: Option<String>,
}

impl ActivityEntry<'_> {
    #[must_use]
    pub fn date(&self) -> DateTime<Utc> {
        match self {
            ActivityEntry::SessionCompleted(log) | ActivityEntry::Historical(log) => log.date,
            ActivityEntry::InProgress { session, .. } => session.start_time,
        }
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        match self {
            ActivityEntry::SessionCompleted(log) | ActivityEntry::Historical(log) => log.completed,
            ActivityEntry::InProgress { .. } => false,
        }
    }

    /// Projects the entry onto the common display shape.
    ///
    /// In-progress sessions are attributed to `user_id` since the ongoing
    /// list does not record an owner.
    #[must_use]
    pub fn view(&self, user_id: &UserId) -> ActivityView {
        match self {
            ActivityEntry::SessionCompleted(log) | ActivityEntry::Historical(log) => ActivityView {
                id: log.id.clone(),
                user_id: log.user_id.clone(),
                workout_id: log.workout_id.clone(),
                workout_name: log.workout_name.clone(),
                date: log.date,
                duration: log.duration,
                calories_burned: log.calories_burned,
                completed: log.completed,
                notes: log.notes.clone(),
            },
            ActivityEntry::InProgress { index, session } => ActivityView {
                id: LogId::new(format!(
                    "session-inprogress-{index}-{}",
                    session.start_time.to_rfc3339()
                )),
                user_id: user_id.clone(),
                workout_id: session.workout_id.clone(),
                workout_name: Some(session.workout_name.clone()),
                date: session.start_time,
                duration: session.duration,
                calories_burned: session.calories_burned,
                completed: false,
                notes: Some(IN_PROGRESS_NOTE.to_owned()),
            },
        }
    }
}

/// Merges the three activity sources, newest first, keeping at most `limit`.
///
/// Entries are concatenated as session-completed, in-progress, historical and
/// then stable-sorted by date, so equal timestamps keep that source order.
#[must_use]
pub fn merge_recent_activity<'a>(
    session_completed: &'a [ProgressLog],
    ongoing: &'a [OngoingSession],
    historical: &'a [ProgressLog],
    limit: usize,
) -> Vec<ActivityEntry<'a>> {
    let mut entries: Vec<ActivityEntry<'a>> =
        Vec::with_capacity(session_completed.len() + ongoing.len() + historical.len());
    entries.extend(session_completed.iter().map(ActivityEntry::SessionCompleted));
    entries.extend(
        ongoing
            .iter()
            .enumerate()
            .map(|(index, session)| ActivityEntry::InProgress { index, session }),
    );
    entries.extend(historical.iter().map(ActivityEntry::Historical));

    // `sort_by` is stable.
    entries.sort_by(|a, b| b.date().cmp(&a.date()));
    entries.truncate(limit);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::session::COMPLETED_NOTE;
    use crate::time::fixed_now;
    use chrono::Duration;

    fn log(id: &str, days_ago: i64) -> ProgressLog {
        ProgressLog {
            id: LogId::new(id),
            user_id: UserId::new("u1"),
            workout_id: Some(WorkoutId::new("1")),
            workout_name: None,
            date: fixed_now() - Duration::days(days_ago),
            duration: 30,
            calories_burned: 250,
            completed: true,
            notes: Some("Felt strong".to_owned()),
        }
    }

    fn ongoing(name: &str, at: DateTime<Utc>) -> OngoingSession {
        OngoingSession {
            workout_id: Some(WorkoutId::new(name)),
            workout_name: name.to_owned(),
            start_time: at,
            duration: 20,
            calories_burned: 120,
        }
    }

    fn ids(entries: &[ActivityEntry<'_>]) -> Vec<String> {
        let user = UserId::new("u1");
        entries
            .iter()
            .map(|e| e.view(&user).id.as_str().to_owned())
            .collect()
    }

    #[test]
    fn sorts_newest_first() {
        let history = vec![log("d3", 1), log("d1", 3), log("d2", 2)];
        let merged = merge_recent_activity(&[], &[], &history, 5);
        assert_eq!(ids(&merged), vec!["d3", "d2", "d1"]);
    }

    #[test]
    fn truncates_to_limit() {
        let history: Vec<ProgressLog> = (0..8).map(|i| log(&format!("l{i}"), i)).collect();
        let merged = merge_recent_activity(&[], &[], &history, 5);
        assert_eq!(merged.len(), 5);
        assert_eq!(ids(&merged)[0], "l0");
    }

    #[test]
    fn ties_keep_source_order() {
        let at = fixed_now();
        let completed = vec![ProgressLog {
            date: at,
            ..log("done", 0)
        }];
        let running = vec![ongoing("run", at)];
        let history = vec![ProgressLog {
            date: at,
            ..log("old", 0)
        }];

        let merged = merge_recent_activity(&completed, &running, &history, 10);

        assert!(matches!(merged[0], ActivityEntry::SessionCompleted(_)));
        assert!(matches!(merged[1], ActivityEntry::InProgress { index: 0, .. }));
        assert!(matches!(merged[2], ActivityEntry::Historical(_)));
    }

    #[test]
    fn in_progress_view_is_not_completed() {
        let running = vec![ongoing("w7", fixed_now())];
        let merged = merge_recent_activity(&[], &running, &[], 5);
        let view = merged[0].view(&UserId::new("u1"));

        assert!(!view.completed);
        assert_eq!(view.notes.as_deref(), Some(IN_PROGRESS_NOTE));
        assert_eq!(view.workout_name.as_deref(), Some("w7"));
        assert!(view.id.as_str().starts_with("session-inprogress-0-"));
    }

    #[test]
    fn completed_views_keep_their_notes() {
        let done = OngoingSession {
            workout_id: None,
            ..ongoing("w8", fixed_now())
        }
        .complete(UserId::new("u1"));
        let completed = vec![done];
        let merged = merge_recent_activity(&completed, &[], &[], 5);
        let view = merged[0].view(&UserId::new("u1"));

        assert!(view.completed);
        assert!(merged[0].is_completed());
        assert_eq!(view.notes.as_deref(), Some(COMPLETED_NOTE));
        assert_eq!(view.workout_id, None);
    }
}
