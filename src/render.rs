//! Terminal rendering for the calendar.
//!
//! Colors come from owo_colors: today's cell is highlighted, days with tasks
//! carry a marker, completed task cards are green.

use chrono::NaiveDate;
use owo_colors::OwoColorize;
use planner_core::Task;
use planner_core::calendar::{MonthGrid, WEEKDAYS};
use planner_core::state::PlannerState;

/// Width of one day cell in the month grid
const CELL_WIDTH: usize = 5;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Task {
    fn render(&self) -> String {
        let mark = if self.completed { "✔" } else { "·" };
        let line = format!("{} {} - {}  {}", mark, self.start_time, self.end_time, self.todo);
        if self.completed {
            line.green().to_string()
        } else {
            line
        }
    }
}

/// Month header, weekday row and day grid for the viewed period.
pub fn render_month(state: &PlannerState, today: NaiveDate) -> String {
    let grid = MonthGrid::new(state.period);
    let mut lines = Vec::new();

    let title = format!("{} {}", grid.period.month_name(), grid.period.year());
    lines.push(title.bold().to_string());

    let header: String = WEEKDAYS
        .iter()
        .map(|d| format!("{:>width$}", d, width = CELL_WIDTH))
        .collect();
    lines.push(header.dimmed().to_string());

    for week in grid.weeks() {
        let row: String = week
            .iter()
            .map(|cell| match cell {
                Some(day) => render_day(state, *day, today),
                None => " ".repeat(CELL_WIDTH),
            })
            .collect();
        lines.push(row);
    }

    lines.join("\n")
}

fn render_day(state: &PlannerState, day: NaiveDate, today: NaiveDate) -> String {
    let marker = if state.task_count_on(day) > 0 { "•" } else { " " };
    let text = format!("{:>width$}{}", day.format("%-d").to_string(), marker, width = CELL_WIDTH - 1);

    if day == today {
        text.black().on_yellow().to_string()
    } else if state.selected_day == Some(day) {
        text.bold().underline().to_string()
    } else {
        text
    }
}

/// Numbered task cards for the selected day.
pub fn render_agenda(state: &PlannerState) -> String {
    let Some(day) = state.selected_day else {
        return "No day selected".dimmed().to_string();
    };

    let mut lines = vec![day.format("%a %b %d %Y").to_string().bold().to_string()];
    let tasks = state.visible_tasks();

    if tasks.is_empty() {
        lines.push(format!("   {}", "No tasks".dimmed()));
    }
    for (i, task) in tasks.iter().enumerate() {
        lines.push(format!("  {:>2}. {}", i + 1, task.render()));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use planner_core::Period;
    use planner_core::state::{Action, FetchTicket};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn task(id: &str, todo: &str, completed: bool) -> Task {
        Task {
            id: id.to_string(),
            date: "2025-03-20".to_string(),
            todo: todo.to_string(),
            start_time: "09:00".to_string(),
            end_time: "11:00".to_string(),
            completed,
        }
    }

    fn state_with_tasks() -> PlannerState {
        let mut state = PlannerState::new(Period::new(2025, 3).unwrap());
        let ticket = FetchTicket {
            period: state.period,
            generation: state.generation(),
        };
        state.apply(Action::TasksLoaded {
            ticket,
            tasks: vec![task("a", "Standup", false), task("b", "Gym", true)],
        });
        state
    }

    #[test]
    fn test_render_task_card() {
        assert_eq!(task("a", "Standup", false).render(), "· 09:00 - 11:00  Standup");
        let done = task("b", "Gym", true).render();
        assert!(done.contains("✔ 09:00 - 11:00  Gym"));
        assert_ne!(done, "✔ 09:00 - 11:00  Gym");
    }

    #[test]
    fn test_render_month_lists_every_day() {
        let state = state_with_tasks();
        let out = render_month(&state, day(1));
        assert!(out.contains("March 2025"));
        assert!(out.contains("Sun"));
        assert!(out.contains("31"));
        // 20 March carries a task marker
        assert!(out.contains("20•"));
        assert!(!out.contains("21•"));
        // title, weekdays, six weeks
        assert_eq!(out.lines().count(), 8);
    }

    #[test]
    fn test_render_agenda() {
        let mut state = state_with_tasks();
        assert!(render_agenda(&state).contains("No day selected"));

        state.apply(Action::SelectDay(day(20)));
        let out = render_agenda(&state);
        assert!(out.contains("Thu Mar 20 2025"));
        assert!(out.contains(" 1. · 09:00 - 11:00  Standup"));
        assert!(out.contains(" 2. "));
        assert!(out.contains("Gym"));

        state.apply(Action::SelectDay(day(21)));
        assert!(render_agenda(&state).contains("No tasks"));
    }
}
