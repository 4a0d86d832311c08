pub mod add;
pub mod day;
pub mod delete;
pub mod done;
pub mod month;
pub mod shell;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use owo_colors::OwoColorize;
use planner_core::calendar::parse_date;
use planner_core::state::Action;
use planner_core::{Period, ValidationError};

use crate::client::PlanApi;
use crate::render;
use crate::session::Session;

/// Open a session on the month containing `date` with that day selected.
pub async fn open_day<A: PlanApi>(api: A, date: &str) -> Result<Session<A>> {
    let day = parse_date(date)?;
    let mut session = Session::open(api, Period::containing(day)).await;
    session.perform(Action::SelectDay(day)).await;
    Ok(session)
}

/// Id of card `number` on the session's selected day.
pub fn require_card<A: PlanApi>(session: &Session<A>, number: usize) -> Result<String> {
    session.card_id(number).ok_or_else(|| {
        let count = session.agenda().len();
        anyhow::anyhow!(
            "No task #{} on this day ({} task{})",
            number,
            count,
            if count == 1 { "" } else { "s" }
        )
    })
}

pub fn print_alert(alert: &ValidationError) {
    println!("{}", alert.to_string().red());
}

pub fn print_agenda<A: PlanApi>(session: &Session<A>) {
    println!("{}", render::render_agenda(session.state()));
}

pub fn print_month<A: PlanApi>(session: &Session<A>) {
    println!("{}", render::render_month(session.state(), today()));
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
