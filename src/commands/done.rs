use anyhow::Result;
use owo_colors::OwoColorize;
use planner_core::state::Action;

use crate::client::PlanApi;
use crate::session::Session;

use super::{open_day, print_agenda, require_card};

pub async fn run<A: PlanApi>(api: A, date: &str, number: usize) -> Result<()> {
    let mut session = open_day(api, date).await?;
    complete(&mut session, number).await?;
    print_agenda(&session);
    Ok(())
}

/// Mark card `number` of the selected day as completed.
pub async fn complete<A: PlanApi>(session: &mut Session<A>, number: usize) -> Result<()> {
    let id = require_card(session, number)?;
    if !session.perform(Action::Complete(id)).await {
        anyhow::bail!("Could not mark task #{} as completed", number);
    }
    println!("{}", format!("Completed task #{number}").green());
    Ok(())
}
