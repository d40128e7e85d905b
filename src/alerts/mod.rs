//! Alert module: which countdown values are alert-worthy and how they sound
//!
//! The threshold table is fixed at startup. Playback goes through the
//! `AlertSink` trait so the driver never waits on audio.

mod sink;
mod thresholds;

pub use sink::{AfplaySink, AlertSink};
pub use thresholds::{AlertAction, AlertThresholds};

#[cfg(test)]
pub use thresholds::Sound;
