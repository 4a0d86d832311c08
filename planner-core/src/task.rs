//! Task types as they travel over the `/plan` API.

use serde::{Deserialize, Serialize};

use crate::calendar::Period;

/// A time-boxed task on one day of the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Store-assigned identifier (a 24-hex ObjectId)
    #[serde(rename = "_id")]
    pub id: String,
    /// ISO `YYYY-MM-DD` day the task belongs to
    pub date: String,
    pub todo: String,
    #[serde(rename = "startTime")]
    pub start_time: String,
    #[serde(rename = "endTime")]
    pub end_time: String,
    #[serde(default)]
    pub completed: bool,
}

/// A task that has not been stored yet: no id, never completed.
///
/// Missing JSON fields decode as empty strings so that the presence check
/// reports them instead of the JSON decoder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub todo: String,
    #[serde(rename = "startTime", default)]
    pub start_time: String,
    #[serde(rename = "endTime", default)]
    pub end_time: String,
}

impl TaskDraft {
    /// The stored form of this draft once the store has picked an id.
    pub fn into_task(self, id: String) -> Task {
        Task {
            id,
            date: self.date,
            todo: self.todo,
            start_time: self.start_time,
            end_time: self.end_time,
            completed: false,
        }
    }
}

/// Body of `PATCH /plan/{taskId}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionUpdate {
    pub completed: bool,
}

/// Which tasks a listing returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskFilter {
    All,
    /// Exact equality on the task's `date` string
    Date(String),
    /// Every task dated inside the month
    Month(Period),
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Date(date) => task.date == *date,
            TaskFilter::Month(period) => task.date.starts_with(&period.date_prefix()),
        }
    }

    /// Query string parameters for `GET /plan`.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        match self {
            TaskFilter::All => Vec::new(),
            TaskFilter::Date(date) => vec![("date", date.clone())],
            TaskFilter::Month(period) => vec![("month", period.to_string())],
        }
    }
}
