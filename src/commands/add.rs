use anyhow::Result;
use owo_colors::OwoColorize;
use planner_core::state::{Action, FormField};

use crate::client::PlanApi;
use crate::session::Session;

use super::{open_day, print_agenda, print_alert};

pub async fn run<A: PlanApi>(api: A, date: &str, todo: String, start: String, end: String) -> Result<()> {
    let mut session = open_day(api, date).await?;

    if let Err(alert) = submit(&mut session, todo, start, end).await {
        print_alert(&alert);
        anyhow::bail!("Task not added");
    }
    // a failed request leaves the form open
    if session.state().form.is_some() {
        anyhow::bail!("Failed to add task (is planner-server running?)");
    }

    println!("{}", "Task added".green());
    print_agenda(&session);
    Ok(())
}

/// Fill the add-task form and submit it.
pub async fn submit<A: PlanApi>(
    session: &mut Session<A>,
    todo: String,
    start: String,
    end: String,
) -> Result<(), planner_core::ValidationError> {
    session.dispatch(Action::OpenForm).await?;
    session.dispatch(Action::EditForm(FormField::Todo, todo)).await?;
    session.dispatch(Action::EditForm(FormField::StartTime, start)).await?;
    session.dispatch(Action::EditForm(FormField::EndTime, end)).await?;
    session.dispatch(Action::Submit).await
}
