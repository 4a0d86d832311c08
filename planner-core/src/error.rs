//! Error types for the planner.

use thiserror::Error;

/// Parse errors for the planner's string formats.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlannerError {
    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid month '{0}'. Expected YYYY-MM")]
    InvalidPeriod(String),

    #[error("Invalid time '{0}'. Expected HH:MM")]
    InvalidTime(String),
}

/// Reasons a new task is refused before it reaches the store.
///
/// The messages are shown to the user as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please select a day first")]
    NoDaySelected,

    #[error("Please provide task name, start time, and end time")]
    MissingFields,

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Please provide valid start and end time in HH:MM format")]
    InvalidTimeFormat,

    #[error("End time must be after start time")]
    EndNotAfterStart,

    #[error("The task duration must be at least 2 hours")]
    TooShort,
}

/// Result type alias for planner parsing.
pub type PlannerResult<T> = Result<T, PlannerError>;
