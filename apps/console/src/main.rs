use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use client_core::{ControllerConfig, HttpStatsService, SessionController, StatsService};
use shared::domain::ExerciseId;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;
use tracing_subscriber::EnvFilter;

mod config;
mod display;

use config::load_settings;
use display::{ConsoleFeed, TerminalDisplay};

#[derive(Parser, Debug)]
struct Args {
    /// Analysis service API base, e.g. http://localhost:5000/api
    #[arg(long)]
    api_url: Option<String>,
    /// Live video feed URL, e.g. http://localhost:5000/video_feed
    #[arg(long)]
    feed_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let mut settings = load_settings();
    if let Some(api_url) = args.api_url {
        settings.api_base_url = api_url;
    }
    if let Some(feed_url) = args.feed_url {
        settings.video_feed_url = feed_url;
    }
    let settings = settings.validated()?;

    let http = Arc::new(HttpStatsService::new(&settings.api_base_url));
    let controller = SessionController::new(
        Arc::clone(&http) as Arc<dyn StatsService>,
        Arc::new(TerminalDisplay),
        Arc::new(ConsoleFeed),
        ControllerConfig::new(settings.video_feed_url),
    );

    if let Err(err) = controller.load_catalog().await {
        warn!(error = %err, "starting without an exercise catalog");
    }

    println!("commands: list | start <exercise-id> | stop | home | health | quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (command, rest) = match line.split_once(' ') {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command {
            "" => {}
            "list" => {
                for exercise in controller.catalog().await {
                    println!("  {} {}  ({})", exercise.icon, exercise.name, exercise.id);
                }
            }
            "start" => {
                if rest.is_empty() {
                    println!("usage: start <exercise-id>");
                    continue;
                }
                if let Err(err) = controller.select_exercise(&ExerciseId::from(rest)).await {
                    warn!(error = %err, "session did not start");
                }
            }
            "stop" => {
                if let Err(err) = controller.stop().await {
                    warn!(error = %err, "session discarded");
                }
            }
            "home" => controller.go_home().await,
            "health" => match http.health().await {
                Ok(health) => match health.current_exercise {
                    Some(exercise) => println!("service {}; running: {exercise}", health.status),
                    None => println!("service {}; no active exercise", health.status),
                },
                Err(err) => println!("service unreachable: {err}"),
            },
            "quit" | "exit" => break,
            other => println!("unknown command: {other}"),
        }
    }

    controller.go_home().await;
    Ok(())
}
