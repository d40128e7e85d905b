//! Core detection state machine
//!
//! `DetectorState::process` is a pure function of the current state and
//! one reading. The driver owns the state and threads it through each tick.

use std::collections::BTreeSet;
use std::fmt;

use crate::alerts::{AlertAction, AlertThresholds};

/// Largest downward step between two accepted readings that is still
/// believed. Anything further is treated as an OCR misread.
pub const REJECT_THRESHOLD: u32 = 5;

/// Progress of the current countdown cycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetectorState {
    /// Last accepted reading
    last_number: Option<u32>,
    /// Threshold values that already fired this cycle
    alerted: BTreeSet<u32>,
}

/// What happened to a single reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// OCR produced nothing parseable
    NoReading,
    /// Dropped as a likely misread
    Rejected { reading: u32, expected: u32 },
    /// Same value as the last accepted reading
    Repeated,
    /// Became the new countdown value
    Accepted { value: u32, restarted: bool },
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::NoReading => write!(f, "NO_READING"),
            Verdict::Rejected { reading, expected } => {
                write!(f, "REJECTED ({} misrecognized, expected {})", reading, expected)
            }
            Verdict::Repeated => write!(f, "REPEATED"),
            Verdict::Accepted { value, restarted: true } => write!(f, "RESTARTED ({})", value),
            Verdict::Accepted { value, restarted: false } => write!(f, "ACCEPTED ({})", value),
        }
    }
}

/// Result of feeding one reading into the machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// State to use for the next tick
    pub state: DetectorState,
    /// Alerts to play for this tick (zero or one)
    pub actions: Vec<AlertAction>,
    /// Value to show for this tick, set only when a reading was accepted
    pub display: Option<u32>,
    pub verdict: Verdict,
}

impl Step {
    fn unchanged(state: DetectorState, verdict: Verdict) -> Self {
        Self {
            state,
            actions: Vec::new(),
            display: None,
            verdict,
        }
    }
}

impl DetectorState {
    /// Fresh state for a new detection run
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn last_number(&self) -> Option<u32> {
        self.last_number
    }

    /// Whether `value` has already alerted in the current cycle
    #[cfg(test)]
    pub fn has_alerted(&self, value: u32) -> bool {
        self.alerted.contains(&value)
    }

    /// Advance the machine by one tick
    pub fn process(mut self, reading: Option<u32>, thresholds: &AlertThresholds) -> Step {
        let Some(reading) = reading else {
            return Step::unchanged(self, Verdict::NoReading);
        };

        if let Some(last) = self.last_number {
            if last.saturating_sub(reading) > REJECT_THRESHOLD {
                let expected = last.saturating_sub(1);
                return Step::unchanged(self, Verdict::Rejected { reading, expected });
            }
            if reading == last {
                return Step::unchanged(self, Verdict::Repeated);
            }
        }

        // An increase means the countdown started over
        let restarted = self.last_number.is_some_and(|last| reading > last);
        if restarted {
            self.alerted.clear();
        }
        self.last_number = Some(reading);

        let mut actions = Vec::new();
        if thresholds.contains(reading) && !self.alerted.contains(&reading) {
            if let Some(sound) = thresholds.sound_for(reading) {
                self.alerted.insert(reading);
                actions.push(AlertAction {
                    value: reading,
                    sound: sound.clone(),
                });
            }
        }

        Step {
            state: self,
            actions,
            display: Some(reading),
            verdict: Verdict::Accepted {
                value: reading,
                restarted,
            },
        }
    }
}
