//! Client-side UI state and its reducer.
//!
//! `PlannerState::apply` is pure: it updates the state and returns at most one
//! `Effect` for the caller to run (a request to the API, or an alert to show).
//! Results of those requests come back in as actions.
//!
//! Every fetch carries a `FetchTicket`. Changing the viewed month bumps the
//! generation, so a slow response for a month the user already left is
//! dropped instead of overwriting the newer listing.

use chrono::NaiveDate;

use crate::calendar::{Period, iso_date};
use crate::error::ValidationError;
use crate::task::{Task, TaskDraft};
use crate::validate::validate_draft;

const DEFAULT_FORM_TIME: &str = "00:00";

/// Identifies the listing a fetch was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub period: Period,
    pub generation: u64,
}

/// In-progress values of the add-task form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    pub todo: String,
    pub start_time: String,
    pub end_time: String,
}

impl Default for TaskForm {
    fn default() -> Self {
        TaskForm {
            todo: String::new(),
            start_time: DEFAULT_FORM_TIME.to_string(),
            end_time: DEFAULT_FORM_TIME.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Todo,
    StartTime,
    EndTime,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Jump to a month (initial load, or any explicit navigation)
    ShowPeriod(Period),
    /// Month selector, 1-based
    ChangeMonth(u32),
    ChangeYear(i32),
    NextMonth,
    PrevMonth,
    /// Refetch the viewed month without navigating
    Refresh,
    SelectDay(NaiveDate),
    OpenForm,
    EditForm(FormField, String),
    CloseForm,
    Submit,
    Delete(String),
    Complete(String),

    TasksLoaded { ticket: FetchTicket, tasks: Vec<Task> },
    TaskCreated,
    TaskDeleted(String),
    /// PATCH response: the updated task, or `None` if the id matched nothing
    TaskUpdated(Option<Task>),
}

/// Work the reducer asks its caller to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Fetch(FetchTicket),
    Create(TaskDraft),
    Delete(String),
    Complete(String),
    Alert(ValidationError),
}

#[derive(Debug, Clone)]
pub struct PlannerState {
    pub period: Period,
    pub selected_day: Option<NaiveDate>,
    /// `None` while the add-task form is hidden
    pub form: Option<TaskForm>,
    /// Latest listing for `period`
    pub tasks: Vec<Task>,
    generation: u64,
}

impl PlannerState {
    pub fn new(period: Period) -> Self {
        PlannerState {
            period,
            selected_day: None,
            form: None,
            tasks: Vec::new(),
            generation: 0,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn ticket(&self) -> FetchTicket {
        FetchTicket {
            period: self.period,
            generation: self.generation,
        }
    }

    /// Tasks of the selected day, in listing order. Empty when no day is selected.
    pub fn visible_tasks(&self) -> Vec<&Task> {
        let Some(day) = self.selected_day else {
            return Vec::new();
        };
        let date = iso_date(day);
        self.tasks.iter().filter(|t| t.date == date).collect()
    }

    pub fn task_count_on(&self, day: NaiveDate) -> usize {
        let date = iso_date(day);
        self.tasks.iter().filter(|t| t.date == date).count()
    }

    pub fn apply(&mut self, action: Action) -> Option<Effect> {
        match action {
            Action::ShowPeriod(period) => Some(self.navigate(period)),
            Action::ChangeMonth(month) => {
                let period = self.period.with_month(month)?;
                Some(self.navigate(period))
            }
            Action::ChangeYear(year) => {
                let period = self.period.with_year(year)?;
                Some(self.navigate(period))
            }
            Action::NextMonth => Some(self.navigate(self.period.next())),
            Action::PrevMonth => Some(self.navigate(self.period.prev())),
            Action::Refresh => Some(self.navigate(self.period)),
            Action::SelectDay(day) => {
                self.selected_day = Some(day);
                let period = Period::containing(day);
                (period != self.period).then(|| self.navigate(period))
            }
            Action::OpenForm => {
                self.form.get_or_insert_with(TaskForm::default);
                None
            }
            Action::EditForm(field, value) => {
                let form = self.form.get_or_insert_with(TaskForm::default);
                match field {
                    FormField::Todo => form.todo = value,
                    FormField::StartTime => form.start_time = value,
                    FormField::EndTime => form.end_time = value,
                }
                None
            }
            Action::CloseForm => {
                self.form = None;
                None
            }
            Action::Submit => Some(self.submit()),
            Action::Delete(id) => Some(Effect::Delete(id)),
            Action::Complete(id) => Some(Effect::Complete(id)),

            Action::TasksLoaded { ticket, tasks } => {
                if ticket.generation == self.generation && ticket.period == self.period {
                    self.tasks = tasks;
                }
                None
            }
            Action::TaskCreated => {
                self.form = None;
                Some(self.navigate(self.period))
            }
            Action::TaskDeleted(id) => {
                self.tasks.retain(|t| t.id != id);
                None
            }
            Action::TaskUpdated(updated) => {
                if let Some(updated) = updated
                    && let Some(task) = self.tasks.iter_mut().find(|t| t.id == updated.id)
                {
                    *task = updated;
                }
                None
            }
        }
    }

    /// Point the view at `period` and request its listing under a fresh generation.
    fn navigate(&mut self, period: Period) -> Effect {
        self.period = period;
        self.generation += 1;
        Effect::Fetch(self.ticket())
    }

    fn submit(&self) -> Effect {
        let Some(day) = self.selected_day else {
            return Effect::Alert(ValidationError::NoDaySelected);
        };
        let form = self.form.clone().unwrap_or_default();
        let draft = TaskDraft {
            date: iso_date(day),
            todo: form.todo,
            start_time: form.start_time,
            end_time: form.end_time,
        };
        match validate_draft(&draft) {
            Ok(()) => Effect::Create(draft),
            Err(e) => Effect::Alert(e),
        }
    }
}
