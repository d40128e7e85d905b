//! Alert playback
//!
//! Playback is fire-and-forget: the player process is spawned and never
//! awaited, so a slow or broken audio device can't stall the polling loop.

use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, warn};

use super::thresholds::Sound;

/// Something that can play an alert sound without blocking
pub trait AlertSink {
    /// Start playing `sound`. Failures are handled inside the sink.
    fn play(&self, sound: &Sound);
}

/// Plays sounds through the macOS `afplay` command line player
#[derive(Debug, Clone)]
pub struct AfplaySink {
    player: String,
    volume: f32,
}

impl AfplaySink {
    pub fn new(player: impl Into<String>, volume: f32) -> Self {
        Self {
            player: player.into(),
            volume,
        }
    }

    fn command(&self, sound: &Sound) -> Command {
        let mut cmd = Command::new(&self.player);
        cmd.arg("-v")
            .arg(self.volume.to_string())
            .arg(sound.path())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        cmd
    }
}

impl AlertSink for AfplaySink {
    fn play(&self, sound: &Sound) {
        match self.command(sound).spawn() {
            Ok(child) => {
                debug!(%sound, pid = ?child.id(), "alert playback started");
            }
            Err(e) => {
                warn!(?e, player = %self.player, %sound, "failed to start alert playback");
            }
        }
    }
}
