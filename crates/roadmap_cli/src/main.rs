//! CLI entry point.
//!
//! # Responsibility
//! - Without arguments, print a linkage probe for `roadmap_core`.
//! - With a roadmap JSON file, print both views and the image prompt.
//!
//! # Environment
//! - `ROADMAP_LOG_DIR`: absolute directory for rolling logs (logging is off
//!   when unset).
//! - `ROADMAP_LOG_LEVEL`: log level, defaults to the build-mode default.

use log::error;
use roadmap_core::{PillarView, RoadmapSession, TimelineView};
use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(message) = init_logging_from_env() {
        eprintln!("logging disabled: {message}");
    }

    let Some(path) = std::env::args().nth(1) else {
        println!("roadmap_core ping={}", roadmap_core::ping());
        println!("roadmap_core version={}", roadmap_core::core_version());
        return ExitCode::SUCCESS;
    };

    match run(&path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!("event=cli_run module=cli status=error");
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging_from_env() -> Result<(), String> {
    let Ok(log_dir) = std::env::var("ROADMAP_LOG_DIR") else {
        return Ok(());
    };
    let level = std::env::var("ROADMAP_LOG_LEVEL")
        .unwrap_or_else(|_| roadmap_core::default_log_level().to_string());
    roadmap_core::init_logging(&level, &log_dir)
}

fn run(path: &str) -> Result<(), String> {
    let payload =
        std::fs::read_to_string(path).map_err(|err| format!("cannot read `{path}`: {err}"))?;

    let mut session = RoadmapSession::new();
    session
        .load_json(&payload)
        .map_err(|err| format!("cannot load `{path}`: {err}"))?;

    if let Some(view) = session.pillar_view() {
        print_pillar_view(&view);
    }
    if let Some(view) = session.timeline_view() {
        print_timeline_view(&view);
    }
    if let Some(prompt) = session.image_prompt() {
        println!("== Image prompt ==");
        println!("{prompt}");
    }
    Ok(())
}

fn print_pillar_view(view: &PillarView) {
    println!("== By pillar ==");
    for lane in &view.lanes {
        println!("[{}] {} ({})", lane.pillar_id, lane.pillar_name, lane.color.hex);
        for block in &lane.blocks {
            println!("  {} {}", block.date, block.name);
            for task in &block.tasks {
                println!("    - {task}");
            }
        }
    }
    println!();
}

fn print_timeline_view(view: &TimelineView) {
    println!(
        "== By timeframe ({} columns, tallest {} tasks) ==",
        view.layout.column_count, view.layout.max_tasks
    );
    for column in &view.columns {
        println!("[{}] {} {}", column.timeframe_id, column.date, column.name);
        for entry in &column.entries {
            println!("  {} ({})", entry.pillar_name, entry.color.hex);
            for task in &entry.tasks {
                println!("    - {task}");
            }
        }
    }
    println!();
}
