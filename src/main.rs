//! Vision Assistant - voice-controlled accessibility shell
//!
//! Main entry point. Opens the desktop window, or replays a scenario file
//! headless with `--scenario`.

use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vision_assistant::scenario::{Scenario, ScenarioRunner};
use vision_assistant::ui::VisionApp;
use vision_assistant::{AppConfig, AppState};

/// Voice-controlled vision assistant
#[derive(Parser)]
#[command(name = "vision-assistant", version, about)]
struct Cli {
    /// Config file (defaults to <config dir>/vision-assistant/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the simulated detectors
    #[arg(long)]
    seed: Option<u64>,

    /// Run a scenario file headless instead of opening the window
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Print the scenario report as JSON
    #[arg(long, requires = "scenario")]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vision_assistant=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => AppConfig::load_default().context("failed to load config")?,
    };
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }

    let state = AppState::from_config(&config);

    if let Some(path) = &cli.scenario {
        let scenario = Scenario::load(path)?;
        std::process::exit(run_scenario(scenario, state, cli.json)?);
    }

    info!("Starting Vision Assistant");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 800.0])
            .with_min_inner_size([480.0, 400.0])
            .with_title("Vision Assistant"),
        ..Default::default()
    };

    eframe::run_native(
        "Vision Assistant",
        options,
        Box::new(|cc| Ok(Box::new(VisionApp::new(cc, state)))),
    )
    .map_err(|e| anyhow::anyhow!("failed to run window: {e}"))
}

/// Replay a scenario and report; returns the process exit code
fn run_scenario(scenario: Scenario, mut state: AppState, json: bool) -> Result<i32> {
    info!("[SCENARIO] Running '{}'", scenario.scenario.name);
    let report = ScenarioRunner::new(scenario).run(&mut state);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.summary());
        for failure in &report.failures {
            println!("  {}ms {}: {}", failure.time_ms, failure.action, failure.reason);
        }
    }

    Ok(report.process_exit_code())
}
