//! Drives `PlannerState` against the API.
//!
//! The reducer decides what to do; the session does it and feeds the result
//! back as an action. Transport and server failures are logged and leave the
//! state as it was. Validation alerts go back to the caller to show.

use planner_core::ValidationError;
use planner_core::state::{Action, Effect, PlannerState};
use planner_core::{Period, Task, TaskFilter};

use crate::client::PlanApi;

pub struct Session<A> {
    api: A,
    state: PlannerState,
}

impl<A: PlanApi> Session<A> {
    /// Start a session viewing `period` and load its tasks.
    pub async fn open(api: A, period: Period) -> Self {
        let mut session = Session {
            api,
            state: PlannerState::new(period),
        };
        session.perform(Action::ShowPeriod(period)).await;
        session
    }

    pub fn state(&self) -> &PlannerState {
        &self.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Id of the n-th (1-based) card on the selected day's agenda.
    pub fn card_id(&self, number: usize) -> Option<String> {
        let index = number.checked_sub(1)?;
        self.state.visible_tasks().get(index).map(|t| t.id.clone())
    }

    /// Apply an action that may be refused with a validation alert.
    pub async fn dispatch(&mut self, action: Action) -> Result<(), ValidationError> {
        self.drive(action).await.map(|_| ())
    }

    /// Apply an action that never alerts (navigation, selection, delete,
    /// complete). Returns whether every request it caused took effect.
    pub async fn perform(&mut self, action: Action) -> bool {
        self.drive(action).await.unwrap_or(false)
    }

    async fn drive(&mut self, action: Action) -> Result<bool, ValidationError> {
        let mut succeeded = true;
        let mut next = self.state.apply(action);
        while let Some(effect) = next {
            if let Effect::Alert(alert) = effect {
                return Err(alert);
            }
            next = match self.run(effect).await {
                Some(result) => {
                    // a PATCH that matched nothing changed nothing
                    if matches!(result, Action::TaskUpdated(None)) {
                        succeeded = false;
                    }
                    self.state.apply(result)
                }
                None => {
                    succeeded = false;
                    None
                }
            };
        }
        Ok(succeeded)
    }

    async fn run(&self, effect: Effect) -> Option<Action> {
        match effect {
            Effect::Fetch(ticket) => {
                match self.api.list_tasks(&TaskFilter::Month(ticket.period)).await {
                    Ok(tasks) => Some(Action::TasksLoaded { ticket, tasks }),
                    Err(e) => {
                        tracing::warn!("Error fetching tasks: {e:#}");
                        None
                    }
                }
            }
            Effect::Create(draft) => match self.api.create_task(&draft).await {
                Ok(()) => Some(Action::TaskCreated),
                Err(e) => {
                    tracing::warn!("Error adding task: {e:#}");
                    None
                }
            },
            Effect::Delete(id) => match self.api.delete_task(&id).await {
                Ok(true) => Some(Action::TaskDeleted(id)),
                Ok(false) => {
                    tracing::warn!("Error deleting task: {id} not found");
                    None
                }
                Err(e) => {
                    tracing::warn!("Error deleting task: {e:#}");
                    None
                }
            },
            Effect::Complete(id) => match self.api.complete_task(&id).await {
                Ok(updated) => Some(Action::TaskUpdated(updated)),
                Err(e) => {
                    tracing::warn!("Error marking task as completed: {e:#}");
                    None
                }
            },
            Effect::Alert(_) => None,
        }
    }

    /// Tasks currently shown for the selected day.
    pub fn agenda(&self) -> Vec<&Task> {
        self.state.visible_tasks()
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    use anyhow::Result;
    use async_trait::async_trait;
    use planner_core::{Task, TaskDraft, TaskFilter};

    use crate::client::PlanApi;

    /// In-process stand-in for the server.
    #[derive(Default)]
    pub struct FakeApi {
        tasks: Mutex<Vec<Task>>,
        next_id: Mutex<u32>,
        requests: Mutex<Vec<String>>,
        offline: AtomicBool,
    }

    impl FakeApi {
        pub fn with_tasks(tasks: Vec<Task>) -> Self {
            FakeApi {
                tasks: Mutex::new(tasks),
                ..Default::default()
            }
        }

        pub fn offline(self) -> Self {
            self.set_offline(true);
            self
        }

        pub fn set_offline(&self, offline: bool) {
            self.offline.store(offline, Ordering::SeqCst);
        }

        fn log(&self, request: String) -> Result<()> {
            self.requests.lock().unwrap().push(request);
            if self.offline.load(Ordering::SeqCst) {
                anyhow::bail!("connection refused");
            }
            Ok(())
        }

        pub fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PlanApi for FakeApi {
        async fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>> {
            self.log(format!("GET {:?}", filter.query_pairs()))?;
            let tasks = self.tasks.lock().unwrap();
            Ok(tasks.iter().filter(|t| filter.matches(t)).cloned().collect())
        }

        async fn create_task(&self, draft: &TaskDraft) -> Result<()> {
            self.log("POST".to_string())?;
            let mut next_id = self.next_id.lock().unwrap();
            *next_id += 1;
            let task = draft.clone().into_task(format!("new-{next_id}"));
            self.tasks.lock().unwrap().push(task);
            Ok(())
        }

        async fn delete_task(&self, id: &str) -> Result<bool> {
            self.log(format!("DELETE {id}"))?;
            let mut tasks = self.tasks.lock().unwrap();
            let before = tasks.len();
            tasks.retain(|t| t.id != id);
            Ok(tasks.len() < before)
        }

        async fn complete_task(&self, id: &str) -> Result<Option<Task>> {
            self.log(format!("PATCH {id}"))?;
            let mut tasks = self.tasks.lock().unwrap();
            Ok(tasks.iter_mut().find(|t| t.id == id).map(|t| {
                t.completed = true;
                t.clone()
            }))
        }
    }
}
