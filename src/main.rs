mod client;
mod commands;
mod config;
mod render;
mod session;

use anyhow::Result;
use clap::{Parser, Subcommand};
use planner_core::Period;
use tracing_subscriber::EnvFilter;

use crate::client::Client;
use crate::config::CliConfig;

#[derive(Parser)]
#[command(name = "planner")]
#[command(about = "Plan your days against a planner-server")]
struct Cli {
    /// planner-server base URL (overrides server_url in config.toml)
    #[arg(long, env = "PLANNER_URL", global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a month with the days that have tasks
    Month {
        /// Month number (1-12), defaults to the current month
        #[arg(short, long)]
        month: Option<u32>,

        /// Year, defaults to the current year
        #[arg(short, long)]
        year: Option<i32>,
    },
    /// List the tasks of a day
    Day {
        /// Date (YYYY-MM-DD)
        date: String,
    },
    /// Add a task to a day
    Add {
        /// Date (YYYY-MM-DD)
        date: String,

        /// What to do
        todo: String,

        /// Start time (HH:MM)
        #[arg(short, long)]
        start: String,

        /// End time (HH:MM), at least two hours after the start
        #[arg(short, long)]
        end: String,
    },
    /// Mark a task as completed
    Done {
        /// Date (YYYY-MM-DD)
        date: String,

        /// Task number as listed by `planner day`
        number: usize,
    },
    /// Delete a task
    Delete {
        /// Date (YYYY-MM-DD)
        date: String,

        /// Task number as listed by `planner day`
        number: usize,
    },
    /// Interactive calendar (default)
    Shell,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = CliConfig::load()?;
    let client = Client::new(&cfg.server_url(cli.server.as_deref()));
    tracing::debug!("Using planner-server at {}", client.base_url());

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Month { month, year } => commands::month::run(client, month, year).await,
        Commands::Day { date } => commands::day::run(client, &date).await,
        Commands::Add {
            date,
            todo,
            start,
            end,
        } => commands::add::run(client, &date, todo, start, end).await,
        Commands::Done { date, number } => commands::done::run(client, &date, number).await,
        Commands::Delete { date, number } => commands::delete::run(client, &date, number).await,
        Commands::Shell => {
            if let Err(e) = client.health().await {
                tracing::warn!("planner-server at {} is not reachable: {e:#}", client.base_url());
            }
            commands::shell::run(client, Period::current()).await
        }
    }
}
