//! Configuration loading and management

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::warn;

/// OCR settings
#[derive(Debug, Clone)]
pub struct OcrConfig {
    /// Luma value above which a pixel counts as foreground
    pub threshold: u8,
    /// Name or path of the tesseract executable
    pub tesseract_bin: String,
}

/// Alert playback settings
#[derive(Debug, Clone)]
pub struct AlertConfig {
    /// Command line player used for alert sounds
    pub player: String,
    /// Volume passed to the player
    pub volume: f32,
}

/// Program configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory for persisted data
    pub data_dir: PathBuf,

    /// Saved region of interest
    pub region_path: PathBuf,

    /// Delay between polling ticks
    pub poll_interval: Duration,

    /// Where `--test` writes the captured region
    pub debug_capture_path: PathBuf,

    pub ocr: OcrConfig,
    pub alert: AlertConfig,
}

impl Config {
    /// Load configuration from environment and defaults
    pub fn load() -> Result<Self> {
        let data_dir = match std::env::var("COUNTDOWN_DATA_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => {
                let home = std::env::var("HOME").context("HOME is not set")?;
                PathBuf::from(home)
                    .join(".local")
                    .join("share")
                    .join("countdown-alert")
            }
        };

        let region_path = data_dir.join("countdown_region.json");

        Ok(Self {
            region_path,
            data_dir,
            poll_interval: Duration::from_millis(env_or("COUNTDOWN_POLL_MS", 150)),
            debug_capture_path: PathBuf::from("test_capture.png"),
            ocr: OcrConfig {
                threshold: env_or("COUNTDOWN_OCR_THRESHOLD", 180),
                tesseract_bin: std::env::var("TESSERACT_BIN")
                    .unwrap_or_else(|_| "tesseract".to_string()),
            },
            alert: AlertConfig {
                player: std::env::var("COUNTDOWN_PLAYER").unwrap_or_else(|_| "afplay".to_string()),
                volume: env_or("COUNTDOWN_VOLUME", 8.0),
            },
        })
    }

    /// Ensure data directory exists
    pub fn ensure_dirs(&self) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir)
            .with_context(|| format!("failed to create {}", self.data_dir.display()))?;
        Ok(())
    }
}

/// Parse an environment override, falling back to `default` when it is
/// unset or unparseable
fn env_or<T: FromStr + Copy + std::fmt::Debug>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => parse_or(key, &raw, default),
        Err(_) => default,
    }
}

fn parse_or<T: FromStr + Copy + std::fmt::Debug>(key: &str, raw: &str, default: T) -> T {
    raw.trim().parse().unwrap_or_else(|_| {
        warn!(key, value = raw, ?default, "ignoring unparseable override");
        default
    })
}
