//! Program entry modes: setup, single-shot test and continuous run

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::alerts::{AfplaySink, AlertThresholds};
use crate::capture::{FrameSource, ScreenCapture};
use crate::config::Config;
use crate::lifecycle::ShutdownSignal;
use crate::ocr::{threshold_bright_pixels, DigitReader, TesseractReader};
use crate::region::Region;
use crate::runner::Runner;

const NO_REGION: &str = "No region configured. Run with --setup first.";

fn reader(config: &Config) -> TesseractReader {
    TesseractReader::new(&config.ocr.tesseract_bin, config.ocr.threshold)
}

fn load_region(config: &Config) -> Result<Option<Region>> {
    Region::load(&config.region_path)
        .with_context(|| format!("failed to load {}", config.region_path.display()))
}

/// Save `region` and try one OCR read on it
pub fn setup(config: &Config, region: Region) -> Result<()> {
    config.ensure_dirs()?;
    region.save(&config.region_path)?;
    println!("Selected region: {region}");
    println!("Region saved to {}", config.region_path.display());

    let mut source = ScreenCapture::new(region);
    let mut reader = reader(config);
    match source.capture() {
        Ok(frame) => match reader.read(&frame) {
            Ok(reading) => println!("Test OCR result: {reading:?}"),
            Err(e) => warn!(error = %e, "test OCR failed"),
        },
        Err(e) => warn!(error = %e, "test capture failed"),
    }
    Ok(())
}

/// Capture the saved region once and report what OCR sees
pub fn test(config: &Config) -> Result<()> {
    let Some(region) = load_region(config)? else {
        println!("{NO_REGION}");
        return Ok(());
    };

    let frame = ScreenCapture::new(region)
        .capture()
        .context("failed to capture region")?;

    let path = &config.debug_capture_path;
    frame
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))?;

    let binary_path = path.with_file_name("test_capture_threshold.png");
    threshold_bright_pixels(&frame, config.ocr.threshold)
        .save(&binary_path)
        .with_context(|| format!("failed to write {}", binary_path.display()))?;

    let reading = reader(config).read(&frame)?;
    println!("Captured region saved to {}", path.display());
    println!("Detected number: {reading:?}");
    Ok(())
}

/// Monitor the saved region until interrupted
pub async fn run(config: &Config) -> Result<()> {
    let Some(region) = load_region(config)? else {
        println!("{NO_REGION}");
        return Ok(());
    };

    let reader = reader(config);
    reader.probe().context("OCR engine unavailable")?;

    let mut source = ScreenCapture::new(region);
    source.capture().context("failed to capture region")?;

    info!(%region, "region loaded");

    let sink = AfplaySink::new(&config.alert.player, config.alert.volume);
    let mut runner = Runner::new(
        source,
        reader,
        sink,
        AlertThresholds::default(),
        config.poll_interval,
    );

    let shutdown = ShutdownSignal::new();
    runner.run(shutdown.wait()).await;
    Ok(())
}
