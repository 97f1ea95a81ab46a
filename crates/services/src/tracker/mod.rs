mod service;
mod tab_store;
mod view;

// Public API of the tab-session tracker.
pub use crate::error::TrackerError;
pub use service::{RECENT_ACTIVITY_LIMIT, SessionTracker};
pub use tab_store::ONGOING_WORKOUTS_KEY;
pub use view::{ActivityItem, ProgressOverview, UNNAMED_WORKOUT};
