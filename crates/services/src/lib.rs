#![forbid(unsafe_code)]

pub mod app_services;
pub mod catalog_service;
pub mod error;
pub mod handoff;
pub mod log_workout_service;
pub mod navigation;
pub mod tracker;

pub use fitness_core::Clock;

pub use app_services::AppServices;
pub use catalog_service::{CatalogService, Dashboard, WorkoutDetails, WorkoutListing};
pub use error::{AppServicesError, CatalogServiceError, LogWorkoutError, TrackerError};
pub use handoff::Handoff;
pub use log_workout_service::LogWorkoutService;
pub use navigation::Navigation;
pub use tracker::{
    ActivityItem, ONGOING_WORKOUTS_KEY, ProgressOverview, RECENT_ACTIVITY_LIMIT, SessionTracker,
};
