//! Core gradebook functionality shared by the library and CLI

pub mod config;
pub mod distribution;
pub mod error;
pub mod gradebook;
pub mod grading;
pub mod models;

pub use distribution::{Distribution, Standing, Summary};
pub use error::{GradebookError, Result};
pub use gradebook::Gradebook;
pub use grading::{AggregationMode, GradingPolicy, MissingWork};

/// Returns the current version of the `gradebook` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
