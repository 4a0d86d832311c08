use anyhow::Result;
use planner_core::Period;

use crate::client::PlanApi;
use crate::session::Session;

use super::print_month;

pub async fn run<A: PlanApi>(api: A, month: Option<u32>, year: Option<i32>) -> Result<()> {
    let period = resolve_period(Period::current(), month, year)?;
    let session = Session::open(api, period).await;

    print_month(&session);
    let count = session.state().tasks.len();
    println!("\n{} task{} this month", count, if count == 1 { "" } else { "s" });

    Ok(())
}

fn resolve_period(current: Period, month: Option<u32>, year: Option<i32>) -> Result<Period> {
    let year = year.unwrap_or(current.year());
    let month = month.unwrap_or(current.month());
    Period::new(year, month).ok_or_else(|| anyhow::anyhow!("Invalid month {}-{:02}", year, month))
}
