//! Static threshold table mapping countdown values to sounds

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Directory holding the stock macOS alert sounds
const SYSTEM_SOUNDS_DIR: &str = "/System/Library/Sounds";

/// A playable sound file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sound {
    path: PathBuf,
}

impl Sound {
    /// Sound at an arbitrary path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// One of the stock system sounds, e.g. `Sound::system("Glass")`
    pub fn system(name: &str) -> Self {
        Self::new(Path::new(SYSTEM_SOUNDS_DIR).join(format!("{name}.aiff")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for Sound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.path.file_stem() {
            Some(stem) => write!(f, "{}", stem.to_string_lossy()),
            None => write!(f, "{}", self.path.display()),
        }
    }
}

/// A single alert decision: play `sound` because `value` was reached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertAction {
    pub value: u32,
    pub sound: Sound,
}

/// Immutable mapping from countdown value to the sound it triggers
#[derive(Debug, Clone)]
pub struct AlertThresholds {
    sounds: BTreeMap<u32, Sound>,
}

impl AlertThresholds {
    /// Build a table from `(value, sound)` pairs
    pub fn new(entries: impl IntoIterator<Item = (u32, Sound)>) -> Self {
        Self {
            sounds: entries.into_iter().collect(),
        }
    }

    /// Whether `value` should trigger an alert
    pub fn contains(&self, value: u32) -> bool {
        self.sounds.contains_key(&value)
    }

    /// Sound configured for `value`
    pub fn sound_for(&self, value: u32) -> Option<&Sound> {
        self.sounds.get(&value)
    }

    /// Highest tracked value
    pub fn max_value(&self) -> Option<u32> {
        self.sounds.keys().next_back().copied()
    }

    #[cfg(test)]
    pub fn values(&self) -> impl Iterator<Item = u32> + '_ {
        self.sounds.keys().copied()
    }
}

impl Default for AlertThresholds {
    /// Pop on 4, 3 and 2, Glass on the final 1
    fn default() -> Self {
        Self::new([
            (4, Sound::system("Pop")),
            (3, Sound::system("Pop")),
            (2, Sound::system("Pop")),
            (1, Sound::system("Glass")),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let thresholds = AlertThresholds::default();
        assert!(thresholds.contains(1));
        assert!(thresholds.contains(4));
        assert!(!thresholds.contains(0));
        assert!(!thresholds.contains(5));
        assert_eq!(thresholds.max_value(), Some(4));
        assert_eq!(thresholds.values().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_sound_lookup() {
        let thresholds = AlertThresholds::default();
        let glass = thresholds.sound_for(1).unwrap();
        assert_eq!(glass.path(), Path::new("/System/Library/Sounds/Glass.aiff"));
        assert_eq!(glass.to_string(), "Glass");
        assert_eq!(thresholds.sound_for(3), Some(&Sound::system("Pop")));
        assert!(thresholds.sound_for(7).is_none());
    }

    #[test]
    fn test_empty_table() {
        let thresholds = AlertThresholds::new([]);
        assert_eq!(thresholds.max_value(), None);
        assert!(!thresholds.contains(1));
    }
}
