//! planetwatch - Entry Point
//!
//! Prints planetary positions to stdout at a fixed interval until interrupted.

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use planetwatch::cli::Cli;
use planetwatch::config::AppConfig;
use planetwatch::ephemeris::{init_ephemeris, SwissEphemeris, TimeSource};
use planetwatch::reporter::{shutdown_channel, Reporter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    cli.apply(&mut config);
    let reporter_config = config.reporter_config()?;

    // Logs go to stderr, stdout carries the report
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("planetwatch={}", config.log_level)));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    tracing::info!("Starting planetwatch");

    // Must run before the provider is built so the data path takes effect
    init_ephemeris(config.ephemeris_path.as_deref());

    let time_source = match config.julian_day {
        Some(julian_day) => {
            tracing::info!(julian_day, "Using fixed time reference");
            TimeSource::Fixed(julian_day)
        }
        None => TimeSource::SystemClock,
    };
    let provider = SwissEphemeris::new(time_source);

    let (stop_tx, stop_rx) = shutdown_channel();
    let mut reporter = Reporter::new(provider, reporter_config, std::io::stdout());

    let run = reporter.run(stop_rx);
    tokio::pin!(run);

    let summary = tokio::select! {
        result = &mut run => result,
        Ok(()) = tokio::signal::ctrl_c() => {
            tracing::info!("Interrupt received, stopping");
            let _ = stop_tx.send(true);
            run.await
        }
    }
    .context("Failed to write report")?;

    tracing::info!(
        cycles = summary.cycles,
        bodies_reported = summary.bodies_reported,
        "Shutting down"
    );

    Ok(())
}
