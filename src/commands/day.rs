use anyhow::Result;

use crate::client::PlanApi;

use super::{open_day, print_agenda};

pub async fn run<A: PlanApi>(api: A, date: &str) -> Result<()> {
    let session = open_day(api, date).await?;
    print_agenda(&session);
    Ok(())
}
