//! `earn-drops`: drive the earn and leaders stores from the command line.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use earn_drops::{App, Config, EarnTask, LoggingBridge, SessionStore};

#[derive(Parser)]
#[command(name = "earn-drops")]
#[command(about = "Fetch earn tasks and the leaderboard", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE", default_value = "earn-drops.json")]
    config: PathBuf,

    /// Session token (overrides config and EARN_SESSION_TOKEN)
    #[arg(long)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List earn tasks with rewards and completion state
    Tasks,
    /// Show the leaderboard
    Leaders,
    /// Complete a task and open its link
    Join {
        /// Task id
        id: i64,
    },
}

fn print_task(task: &EarnTask) {
    println!(
        "[{}] #{} {} - {} ({} participants, {}s left)",
        if task.completed { "x" } else { " " },
        task.id,
        task.name,
        task.amount,
        task.participants,
        task.time / 1000
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "earn_drops=info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let mut config = Config::load(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config.display()))?;
    if cli.token.is_some() {
        config.session_token = cli.token;
    }

    let session = Arc::new(SessionStore::new(config.session_token.clone()));
    let app = App::new(&config, session, Arc::new(LoggingBridge))
        .with_context(|| format!("Invalid API base URL: {}", config.api_base_url))?;

    match cli.command {
        Commands::Tasks => {
            app.earn.request_tasks().await?;
            println!("{} COLLABS", app.earn.task_count());
            for task in app.earn.tasks().iter() {
                print_task(task);
            }
        }
        Commands::Leaders => {
            app.leaders.request_leaders().await?;
            if let Some(first) = app.leaders.first_place() {
                println!("#{} {} {}", first.position, first.name, first.score);
            }
            for entry in app.leaders.rest() {
                println!("#{} {} {}", entry.position, entry.name, entry.score);
            }
        }
        Commands::Join { id } => {
            app.earn.request_tasks().await?;
            let link = app
                .earn
                .tasks()
                .iter()
                .find(|t| t.id == id)
                .map(|t| t.link.clone())
                .unwrap_or_default();
            app.earn.join_task(id, &link).await?;
            if let Some(task) = app.earn.tasks().iter().find(|t| t.id == id) {
                print_task(task);
            }
        }
    }

    Ok(())
}
