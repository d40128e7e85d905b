//! Polling driver
//!
//! Ties capture, OCR, the detection state machine and alert playback
//! together on a fixed cadence until shutdown. Capture and OCR block, so
//! each read runs on tokio's blocking pool while the loop keeps watching
//! for shutdown.

use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::anyhow;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, trace, warn};

use crate::alerts::{AlertSink, AlertThresholds};
use crate::capture::FrameSource;
use crate::detector::{DetectorState, Verdict};
use crate::ocr::DigitReader;

/// Counters reported when a run ends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub ticks: u64,
    pub accepted: u64,
    pub rejected: u64,
    pub alerts: u64,
    /// Ticks where capture or OCR failed outright
    pub read_failures: u64,
}

/// Capture and OCR halves of a tick, shared with the blocking pool
struct FrameReader<F, R> {
    source: F,
    reader: R,
}

impl<F: FrameSource, R: DigitReader> FrameReader<F, R> {
    fn read(&mut self) -> anyhow::Result<Option<u32>> {
        let frame = self.source.capture()?;
        Ok(self.reader.read(&frame)?)
    }
}

/// Drives one detection run
pub struct Runner<F, R, S> {
    io: Arc<Mutex<FrameReader<F, R>>>,
    sink: S,
    thresholds: AlertThresholds,
    state: DetectorState,
    poll_interval: Duration,
    stats: RunStats,
    /// Consecutive failed reads, to avoid a warning every tick
    failure_streak: u64,
}

impl<F, R, S> Runner<F, R, S>
where
    F: FrameSource + Send + 'static,
    R: DigitReader + Send + 'static,
    S: AlertSink,
{
    pub fn new(
        source: F,
        reader: R,
        sink: S,
        thresholds: AlertThresholds,
        poll_interval: Duration,
    ) -> Self {
        Self {
            io: Arc::new(Mutex::new(FrameReader { source, reader })),
            sink,
            thresholds,
            state: DetectorState::new(),
            poll_interval: poll_interval.max(Duration::from_millis(1)),
            stats: RunStats::default(),
            failure_streak: 0,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &DetectorState {
        &self.state
    }

    #[cfg(test)]
    pub fn stats(&self) -> RunStats {
        self.stats
    }

    /// Capture and read one frame off the async executor
    async fn read_blocking(&self) -> anyhow::Result<Option<u32>> {
        let io = Arc::clone(&self.io);
        tokio::task::spawn_blocking(move || {
            let mut io = io.lock().map_err(|_| anyhow!("frame reader lock poisoned"))?;
            io.read()
        })
        .await?
    }

    /// Capture and read one frame. Failures count as no reading.
    async fn read_once(&mut self) -> Option<u32> {
        match self.read_blocking().await {
            Ok(reading) => {
                if self.failure_streak > 0 {
                    info!(failed_ticks = self.failure_streak, "frame reads recovered");
                    self.failure_streak = 0;
                }
                reading
            }
            Err(e) => {
                self.stats.read_failures += 1;
                self.failure_streak += 1;
                if self.failure_streak == 1 {
                    warn!(error = %e, "failed to read frame");
                } else {
                    debug!(error = %e, streak = self.failure_streak, "frame read still failing");
                }
                None
            }
        }
    }

    /// Run a single polling tick
    pub async fn tick(&mut self) -> Verdict {
        let reading = self.read_once().await;
        self.feed(reading)
    }

    /// Push one reading through the state machine and play any alerts
    fn feed(&mut self, reading: Option<u32>) -> Verdict {
        self.stats.ticks += 1;

        let step = std::mem::take(&mut self.state).process(reading, &self.thresholds);
        self.state = step.state;

        match step.verdict {
            Verdict::NoReading | Verdict::Repeated => {
                trace!(verdict = %step.verdict, "tick");
            }
            Verdict::Rejected { reading, expected } => {
                self.stats.rejected += 1;
                info!(reading, expected, "{} misrecognized, expected {}", reading, expected);
            }
            Verdict::Accepted { restarted, .. } => {
                self.stats.accepted += 1;
                if restarted {
                    debug!("countdown restarted, alerts re-armed");
                }
            }
        }

        if let Some(value) = step.display {
            if step.actions.is_empty() {
                info!(value, "countdown");
            }
        }

        for action in &step.actions {
            self.stats.alerts += 1;
            info!(value = action.value, sound = %action.sound, "countdown 🔔");
            self.sink.play(&action.sound);
        }

        step.verdict
    }

    /// Poll until `shutdown` resolves, then return the run's counters
    pub async fn run(&mut self, shutdown: impl Future<Output = ()>) -> RunStats {
        let mut interval = tokio::time::interval(self.poll_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        info!(
            interval = ?self.poll_interval,
            max_value = ?self.thresholds.max_value(),
            "monitoring for countdown"
        );

        loop {
            tokio::select! {
                biased;

                _ = &mut shutdown => break,
                _ = interval.tick() => {}
            }

            // Shutdown abandons a read in flight; its blocking task finishes
            // on its own and the reading is never fed
            tokio::select! {
                biased;

                _ = &mut shutdown => break,
                _ = self.tick() => {}
            }
        }

        info!(
            ticks = self.stats.ticks,
            accepted = self.stats.accepted,
            rejected = self.stats.rejected,
            alerts = self.stats.alerts,
            read_failures = self.stats.read_failures,
            "detection stopped"
        );

        self.stats
    }
}
