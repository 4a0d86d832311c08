use anyhow::Result;
use dialoguer::Input;
use owo_colors::OwoColorize;
use planner_core::Period;
use planner_core::state::Action;

use crate::client::PlanApi;
use crate::session::Session;

use super::{add, delete, done, print_agenda, print_alert, print_month};

const HELP: &str = "  next | prev        show the next / previous month
  month N            jump to month N (1-12)
  year N             jump to year N
  day N              select day N of the shown month
  add                add a task to the selected day
  done N             mark task N of the selected day as completed
  rm N               delete task N of the selected day
  refresh            reload the shown month
  help               show this help
  quit               exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Next,
    Prev,
    Month(u32),
    Year(i32),
    Day(u32),
    Add,
    Done(usize),
    Remove(usize),
    Refresh,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<ShellCommand, String> {
    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        return Err("Type `help` for a list of commands".to_string());
    };
    let arg = words.next();
    if words.next().is_some() {
        return Err(format!("Too many arguments for `{name}`"));
    }

    let command = match name {
        "next" | "n" => ShellCommand::Next,
        "prev" | "p" => ShellCommand::Prev,
        "month" => {
            let month = number(name, arg)?;
            if !(1..=12).contains(&month) {
                return Err("Month must be between 1 and 12".to_string());
            }
            ShellCommand::Month(month)
        }
        "year" => ShellCommand::Year(number(name, arg)?),
        "day" | "d" => ShellCommand::Day(number(name, arg)?),
        "add" | "a" => ShellCommand::Add,
        "done" => ShellCommand::Done(number(name, arg)?),
        "rm" | "delete" => ShellCommand::Remove(number(name, arg)?),
        "refresh" | "r" => ShellCommand::Refresh,
        "help" | "h" | "?" => ShellCommand::Help,
        "quit" | "q" | "exit" => ShellCommand::Quit,
        other => return Err(format!("Unknown command `{other}`. Type `help` for a list of commands")),
    };

    let takes_arg = matches!(
        command,
        ShellCommand::Month(_)
            | ShellCommand::Year(_)
            | ShellCommand::Day(_)
            | ShellCommand::Done(_)
            | ShellCommand::Remove(_)
    );
    if !takes_arg && arg.is_some() {
        return Err(format!("`{name}` takes no arguments"));
    }
    Ok(command)
}

fn number<T: std::str::FromStr>(name: &str, arg: Option<&str>) -> Result<T, String> {
    let arg = arg.ok_or_else(|| format!("Usage: {name} N"))?;
    arg.parse().map_err(|_| format!("`{arg}` is not a number"))
}

pub async fn run<A: PlanApi>(api: A, period: Period) -> Result<()> {
    let mut session = Session::open(api, period).await;
    println!("Type `help` for a list of commands.\n");
    print_month(&session);

    loop {
        let line: String = Input::new()
            .with_prompt("planner")
            .allow_empty(true)
            .interact_text()?;

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(msg) => {
                println!("{}", msg.dimmed());
                continue;
            }
        };

        match command {
            ShellCommand::Quit => break,
            ShellCommand::Help => println!("{HELP}"),
            command => {
                if let Err(e) = execute(&mut session, command).await {
                    println!("{}", e.to_string().red());
                }
            }
        }
        println!();
    }

    Ok(())
}

async fn execute<A: PlanApi>(session: &mut Session<A>, command: ShellCommand) -> Result<()> {
    match command {
        ShellCommand::Next => navigate(session, Action::NextMonth).await,
        ShellCommand::Prev => navigate(session, Action::PrevMonth).await,
        ShellCommand::Month(month) => navigate(session, Action::ChangeMonth(month)).await,
        ShellCommand::Refresh => navigate(session, Action::Refresh).await,
        ShellCommand::Year(year) => {
            let options = session.state().period.year_options();
            if !options.contains(&year) {
                anyhow::bail!(
                    "Year must be between {} and {}",
                    options.first().copied().unwrap_or(year),
                    options.last().copied().unwrap_or(year)
                );
            }
            navigate(session, Action::ChangeYear(year)).await
        }
        ShellCommand::Day(day) => {
            let period = session.state().period;
            let date = period
                .day(day)
                .ok_or_else(|| anyhow::anyhow!("{} has no day {}", period.month_name(), day))?;
            session.perform(Action::SelectDay(date)).await;
            print_month(session);
            print_agenda(session);
            Ok(())
        }
        ShellCommand::Add => {
            if session.state().selected_day.is_none() {
                print_alert(&planner_core::ValidationError::NoDaySelected);
                return Ok(());
            }
            let form = session.state().form.clone().unwrap_or_default();
            let todo: String = Input::new()
                .with_prompt("  Task")
                .with_initial_text(form.todo)
                .allow_empty(true)
                .interact_text()?;
            let start: String = Input::new()
                .with_prompt("  Start (HH:MM)")
                .default(form.start_time)
                .interact_text()?;
            let end: String = Input::new()
                .with_prompt("  End (HH:MM)")
                .default(form.end_time)
                .interact_text()?;

            match add::submit(session, todo, start, end).await {
                Ok(()) if session.state().form.is_none() => {
                    println!("{}", "Task added".green());
                    print_agenda(session);
                }
                Ok(()) => anyhow::bail!("Failed to add task"),
                Err(alert) => print_alert(&alert),
            }
            Ok(())
        }
        ShellCommand::Done(number) => {
            done::complete(session, number).await?;
            print_agenda(session);
            Ok(())
        }
        ShellCommand::Remove(number) => {
            delete::remove(session, number).await?;
            print_agenda(session);
            Ok(())
        }
        ShellCommand::Help | ShellCommand::Quit => Ok(()),
    }
}

async fn navigate<A: PlanApi>(session: &mut Session<A>, action: Action) -> Result<()> {
    session.perform(action).await;
    print_month(session);
    Ok(())
}
