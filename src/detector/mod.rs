//! Countdown detection
//!
//! Turns one optional OCR reading per tick into a clean countdown signal:
//! - absent readings are ignored
//! - large downward jumps are rejected as misreads
//! - repeated frames are debounced
//! - an increase starts a new cycle and re-arms every threshold

mod machine;

pub use machine::{DetectorState, Verdict};
