//! The validation sequence for new tasks.
//!
//! Both the client (before anything is sent) and the server (before anything
//! is stored) run this. Checks run in a fixed order and stop at the first
//! failure, so the user always sees the most basic problem first.

use crate::calendar::parse_date;
use crate::error::ValidationError;
use crate::task::TaskDraft;
use crate::time::{ClockTime, MIN_TASK_MINUTES};

pub fn validate_draft(draft: &TaskDraft) -> Result<(), ValidationError> {
    if draft.todo.is_empty()
        || draft.start_time.is_empty()
        || draft.end_time.is_empty()
        || draft.date.is_empty()
    {
        return Err(ValidationError::MissingFields);
    }

    parse_date(&draft.date).map_err(|_| ValidationError::InvalidDate(draft.date.clone()))?;

    let (start, end) = match (
        ClockTime::parse(&draft.start_time),
        ClockTime::parse(&draft.end_time),
    ) {
        (Ok(start), Ok(end)) => (start, end),
        _ => return Err(ValidationError::InvalidTimeFormat),
    };

    if start >= end {
        return Err(ValidationError::EndNotAfterStart);
    }

    if start.minutes_until(end) < MIN_TASK_MINUTES {
        return Err(ValidationError::TooShort);
    }

    Ok(())
}
