//! # Greenthumb
//!
//! Runs a scripted watering session without a window and logs everything
//! a player would have seen.
//!
//! Usage: `greenthumb [CONFIG_PATH]`. Without a path the platform config
//! directory is used; a missing or broken file falls back to defaults.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use greenthumb_engine::config::EngineConfig;
use greenthumb_engine::scenario::{Scenario, ScenarioRunner};
use greenthumb_engine::timing::FixedStep;
use greenthumb_engine::views::LoggingViews;
use greenthumb_gameplay::Garden;

/// Main entry point.
fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("greenthumb=info".parse()?))
        .init();

    info!("Greenthumb starting...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let mut config = match std::env::args_os().nth(1) {
        Some(path) => EngineConfig::load_from(path),
        None => EngineConfig::load(),
    };
    config.validate();

    let mut views = LoggingViews::new();
    let stats = views.stats();
    let mut garden = Garden::from_config(&config.garden, &mut views)?;

    let scenario = Scenario::watering_round(&config.garden);
    let mut runner = ScenarioRunner::new(
        FixedStep::new(config.fixed_dt(), config.max_updates_per_frame),
        config.frame_dt(),
    );
    let report = runner.run(&mut garden, &scenario)?;

    info!(
        "{} ticks over {:.1}s: {} events, {} stage switches, {} popups",
        report.ticks,
        report.simulated,
        report.events.len(),
        stats.stage_switches(),
        stats.popups_shown()
    );
    if report.all_complete() {
        info!("Every plant is fully grown");
    }

    info!("Greenthumb shutdown complete");
    Ok(())
}
