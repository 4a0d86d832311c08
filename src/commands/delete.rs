use anyhow::Result;
use planner_core::state::Action;

use crate::client::PlanApi;
use crate::session::Session;

use super::{open_day, print_agenda, require_card};

pub async fn run<A: PlanApi>(api: A, date: &str, number: usize) -> Result<()> {
    let mut session = open_day(api, date).await?;
    remove(&mut session, number).await?;
    print_agenda(&session);
    Ok(())
}

/// Delete card `number` of the selected day.
pub async fn remove<A: PlanApi>(session: &mut Session<A>, number: usize) -> Result<()> {
    let id = require_card(session, number)?;
    if !session.perform(Action::Delete(id)).await {
        anyhow::bail!("Could not delete task #{}", number);
    }
    println!("Deleted task #{}", number);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::seeded;

    #[tokio::test]
    async fn test_remove_card() {
        let mut session = open_day(seeded(), "2025-03-20").await.unwrap();
        remove(&mut session, 1).await.unwrap();

        let ids: Vec<_> = session.agenda().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["c"]);
        assert_eq!(session.state().tasks.len(), 2);
        assert_eq!(session.api().requests().last().unwrap(), "DELETE a");
    }

    #[tokio::test]
    async fn test_remove_fails_when_server_is_down() {
        let mut session = open_day(seeded(), "2025-03-20").await.unwrap();
        session.api().set_offline(true);
        assert!(remove(&mut session, 1).await.is_err());
        assert_eq!(session.agenda().len(), 2);
    }

    #[tokio::test]
    async fn test_remove_out_of_range() {
        let mut session = open_day(seeded(), "2025-03-21").await.unwrap();
        assert!(remove(&mut session, 2).await.is_err());
        assert_eq!(session.agenda().len(), 1);
    }
}
