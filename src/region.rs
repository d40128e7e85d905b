//! Screen region of interest and its on-disk form

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Rectangle in absolute screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub left: i32,
    pub top: i32,
    pub width: u32,
    pub height: u32,
}

/// Errors loading, saving or parsing a region
#[derive(Debug, thiserror::Error)]
pub enum RegionError {
    #[error("failed to access region file: {0}")]
    Io(#[from] std::io::Error),

    #[error("region file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("region must have a non-zero width and height, got {width}x{height}")]
    Invalid { width: u32, height: u32 },

    #[error("expected LEFT,TOP,WIDTH,HEIGHT, got '{0}'")]
    Malformed(String),
}

impl Region {
    pub fn new(left: i32, top: i32, width: u32, height: u32) -> Result<Self, RegionError> {
        let region = Self {
            left,
            top,
            width,
            height,
        };
        region.validate()?;
        Ok(region)
    }

    fn validate(&self) -> Result<(), RegionError> {
        if self.width == 0 || self.height == 0 {
            return Err(RegionError::Invalid {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Load a saved region. `Ok(None)` when nothing has been saved yet.
    pub fn load(path: &Path) -> Result<Option<Self>, RegionError> {
        if !path.exists() {
            debug!(?path, "no saved region");
            return Ok(None);
        }

        let contents = std::fs::read_to_string(path)?;
        let region: Region = serde_json::from_str(&contents)?;
        region.validate()?;
        Ok(Some(region))
    }

    /// Persist the region, replacing any previous one
    pub fn save(&self, path: &Path) -> Result<(), RegionError> {
        let json = serde_json::to_string(self)?;
        std::fs::write(path, json)?;
        info!(?path, region = %self, "region saved");
        Ok(())
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{} at ({}, {})",
            self.width, self.height, self.left, self.top
        )
    }
}

impl FromStr for Region {
    type Err = RegionError;

    /// Parse `LEFT,TOP,WIDTH,HEIGHT`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || RegionError::Malformed(s.to_string());
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        let [left, top, width, height] = parts.as_slice() else {
            return Err(malformed());
        };

        Region::new(
            left.parse().map_err(|_| malformed())?,
            top.parse().map_err(|_| malformed())?,
            width.parse().map_err(|_| malformed())?,
            height.parse().map_err(|_| malformed())?,
        )
    }
}

#[cfg(test)]
mod tests {
    use tokio_test::assert_ok;

    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!(
            "countdown-alert-{}-{}.json",
            name,
            std::process::id()
        ))
    }

    #[test]
    fn test_region_json_shape() {
        let region = Region::new(100, -20, 80, 60).unwrap();
        let json = serde_json::to_string(&region).unwrap();
        assert_eq!(json, r#"{"left":100,"top":-20,"width":80,"height":60}"#);
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("save");
        let region = assert_ok!(Region::new(10, 20, 30, 40));
        assert_ok!(region.save(&path));
        assert_eq!(assert_ok!(Region::load(&path)), Some(region));
        assert_ok!(std::fs::remove_file(&path));
    }

    #[test]
    fn test_load_missing_file() {
        let path = temp_path("missing");
        assert!(assert_ok!(Region::load(&path)).is_none());
    }

    #[test]
    fn test_load_rejects_garbage() {
        let path = temp_path("garbage");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(Region::load(&path), Err(RegionError::Parse(_))));

        std::fs::write(&path, r#"{"left":0,"top":0,"width":0,"height":5}"#).unwrap();
        assert!(matches!(Region::load(&path), Err(RegionError::Invalid { .. })));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_parse_from_str() {
        let region: Region = assert_ok!("1200, 80,160,120".parse());
        assert_eq!(region, Region::new(1200, 80, 160, 120).unwrap());

        assert!(matches!("1,2,3".parse::<Region>(), Err(RegionError::Malformed(_))));
        assert!(matches!("a,2,3,4".parse::<Region>(), Err(RegionError::Malformed(_))));
        assert!(matches!("1,2,-3,4".parse::<Region>(), Err(RegionError::Malformed(_))));
        assert!(matches!("1,2,0,4".parse::<Region>(), Err(RegionError::Invalid { .. })));
    }
}
