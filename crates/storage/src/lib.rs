#![forbid(unsafe_code)]

pub mod dataset;
pub mod repository;
pub mod sqlite;

pub use dataset::Dataset;
pub use repository::{Storage, StorageError};
