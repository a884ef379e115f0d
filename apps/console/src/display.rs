//! println-based display surface and feed stub for the interactive console.

use client_core::{
    CountdownStep, DisplaySurface, FeedbackItem, LiveFeed, Screen, StatsFields, SummaryView,
};
use shared::domain::Exercise;

pub struct TerminalDisplay;

impl DisplaySurface for TerminalDisplay {
    fn show_screen(&self, screen: Screen) {
        match screen {
            Screen::Selection => println!("\n== Choose an exercise =="),
            Screen::Loading => println!("\nGetting ready..."),
            Screen::Workout => println!("\n== Workout =="),
            Screen::Summary => println!("\n== Workout Complete =="),
        }
    }

    fn render_exercises(&self, exercises: &[Exercise]) {
        for exercise in exercises {
            println!("  {} {}  ({})", exercise.icon, exercise.name, exercise.id);
        }
    }

    fn set_session_title(&self, title: &str) {
        println!("-- {title} --");
    }

    fn render_countdown(&self, step: CountdownStep) {
        match step {
            CountdownStep::Tick(count) => println!("{count}..."),
            CountdownStep::Go => println!("GO!"),
            CountdownStep::Clear => {}
        }
    }

    fn render_stats(&self, fields: &StatsFields) {
        let mut line = format!(
            "reps {} | good {} | stage {} | time {}",
            fields.reps, fields.good_reps, fields.stage, fields.elapsed
        );
        if let Some(extra) = &fields.extra {
            line.push_str(&format!(" | {} {}", extra.label, extra.value));
        }
        println!("{line}");
    }

    fn render_feedback(&self, items: &[FeedbackItem]) {
        for item in items {
            match item {
                FeedbackItem::Good(text) => println!("  + {text}"),
                FeedbackItem::Warning(text) => println!("  ! {text}"),
            }
        }
    }

    fn render_summary(&self, view: &SummaryView) {
        match view {
            SummaryView::NoData => println!("No workout data available."),
            SummaryView::Stats(rows) => {
                for row in rows {
                    println!("  {:<18} {}", row.label, row.value);
                }
            }
        }
    }

    fn show_error(&self, message: &str) {
        eprintln!("error: {message}");
    }
}

/// The console has no video pane; the feed URL is only logged so a player
/// can be pointed at it.
pub struct ConsoleFeed;

impl LiveFeed for ConsoleFeed {
    fn start(&self, url: &str) {
        tracing::info!(url, "live feed started");
    }

    fn stop(&self) {
        tracing::info!("live feed stopped");
    }
}
