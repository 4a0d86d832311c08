//! Core types for the planner.
//!
//! This crate provides the types shared by planner-server and the planner CLI:
//! - `Task` and friends as they travel over the `/plan` API
//! - the validation sequence applied to new tasks on both sides of the wire
//! - month arithmetic for the calendar view
//! - `PlannerState`, the client's UI state and its reducer

pub mod calendar;
pub mod error;
pub mod state;
pub mod task;
pub mod time;
pub mod validate;

pub use calendar::{MonthGrid, Period};
pub use error::{PlannerError, ValidationError};
pub use task::*;
pub use time::ClockTime;
pub use validate::validate_draft;
