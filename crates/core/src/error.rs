use thiserror::Error;

use crate::model::{CatalogParseError, CustomWorkoutError, ParseIdError};

/// Parse and validation failures surfaced by the domain model.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    CatalogParse(#[from] CatalogParseError),
    #[error(transparent)]
    CustomWorkout(#[from] CustomWorkoutError),
    #[error(transparent)]
    ParseId(#[from] ParseIdError),
}
