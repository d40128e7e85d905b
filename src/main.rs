//! countdown-alert: audible cues for on-screen countdowns
//!
//! Watches a fixed screen region (for example the rep timer in a workout
//! video), reads the digit shown there and plays a sound as the countdown
//! reaches its last few values:
//! - Screen capture of a saved region via CoreGraphics
//! - Digit OCR through the tesseract command line tool
//! - A debounced, misread-tolerant detection state machine
//! - Fire-and-forget alert playback through afplay

mod alerts;
mod capture;
mod cli;
mod config;
mod detector;
mod lifecycle;
mod modes;
mod ocr;
mod region;
mod runner;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Mode};
use crate::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "countdown-alert starting"
    );

    // Load configuration
    let config = Config::load()?;
    info!(?config.region_path, ?config.poll_interval, "configuration loaded");

    match cli.mode() {
        Mode::Setup(region) => modes::setup(&config, region)?,
        Mode::Test => modes::test(&config)?,
        Mode::Run => modes::run(&config).await?,
    }

    info!("countdown-alert stopped");

    Ok(())
}
