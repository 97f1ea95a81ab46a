/// View the caller should show after an operation that changes pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Progress page, after starting a workout.
    Progress,
    /// Workout dashboard, after logging a custom workout.
    Dashboard,
}
