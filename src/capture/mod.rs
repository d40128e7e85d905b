//! Screen capture of the configured region
//!
//! `ScreenCapture` grabs the region through CoreGraphics on macOS. Other
//! platforms get a source that always reports `Unsupported`.

mod screen;

use image::RgbaImage;

pub use screen::ScreenCapture;

/// Produces a snapshot of a fixed screen region on demand
pub trait FrameSource {
    fn capture(&mut self) -> Result<RgbaImage, CaptureError>;
}

/// Errors that can occur while capturing a frame
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("screen capture is not supported on this platform")]
    Unsupported,

    #[error("capture region is empty")]
    EmptyRegion,

    #[cfg_attr(not(target_os = "macos"), allow(dead_code))]
    #[error("screenshot was refused - grant Screen Recording permission in System Settings > Privacy & Security")]
    ScreenshotDenied,

    #[error("captured pixel buffer is malformed: {0}")]
    InvalidBuffer(String),
}
