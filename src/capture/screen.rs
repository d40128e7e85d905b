//! CoreGraphics screen grabber

use image::RgbaImage;
use tracing::debug;

use super::{CaptureError, FrameSource};
use crate::region::Region;

/// Captures a fixed region of the desktop
#[derive(Debug, Clone)]
pub struct ScreenCapture {
    region: Region,
}

impl ScreenCapture {
    pub fn new(region: Region) -> Self {
        Self { region }
    }
}

impl FrameSource for ScreenCapture {
    fn capture(&mut self) -> Result<RgbaImage, CaptureError> {
        if self.region.width == 0 || self.region.height == 0 {
            return Err(CaptureError::EmptyRegion);
        }
        let frame = platform::grab(&self.region)?;
        debug!(width = frame.width(), height = frame.height(), "frame captured");
        Ok(frame)
    }
}

/// Convert a BGRA buffer with row padding into a tightly packed RGBA image
#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
fn bgra_to_rgba(
    bytes: &[u8],
    width: u32,
    height: u32,
    bytes_per_row: usize,
) -> Result<RgbaImage, CaptureError> {
    let row_len = width as usize * 4;
    if bytes_per_row < row_len || bytes.len() < bytes_per_row * height as usize {
        return Err(CaptureError::InvalidBuffer(format!(
            "{} bytes for {}x{} with stride {}",
            bytes.len(),
            width,
            height,
            bytes_per_row
        )));
    }

    let mut rgba = Vec::with_capacity(row_len * height as usize);
    for row in bytes.chunks(bytes_per_row).take(height as usize) {
        for px in row[..row_len].chunks_exact(4) {
            rgba.extend_from_slice(&[px[2], px[1], px[0], px[3]]);
        }
    }

    RgbaImage::from_raw(width, height, rgba)
        .ok_or_else(|| CaptureError::InvalidBuffer("pixel count mismatch".to_string()))
}

#[cfg(target_os = "macos")]
mod platform {
    use core_foundation::data::CFData;
    use core_graphics::display::CGDisplay;
    use core_graphics::geometry::{CGPoint, CGRect, CGSize};
    use core_graphics::window::{
        kCGNullWindowID, kCGWindowImageDefault, kCGWindowListOptionOnScreenOnly,
    };
    use image::RgbaImage;

    use super::bgra_to_rgba;
    use crate::capture::CaptureError;
    use crate::region::Region;

    pub fn grab(region: &Region) -> Result<RgbaImage, CaptureError> {
        let bounds = CGRect::new(
            &CGPoint::new(region.left as f64, region.top as f64),
            &CGSize::new(region.width as f64, region.height as f64),
        );

        let image = CGDisplay::screenshot(
            bounds,
            kCGWindowListOptionOnScreenOnly,
            kCGNullWindowID,
            kCGWindowImageDefault,
        )
        .ok_or(CaptureError::ScreenshotDenied)?;

        if image.bits_per_pixel() != 32 {
            return Err(CaptureError::InvalidBuffer(format!(
                "unexpected {} bits per pixel",
                image.bits_per_pixel()
            )));
        }

        let data: CFData = image.data();
        bgra_to_rgba(
            data.bytes(),
            image.width() as u32,
            image.height() as u32,
            image.bytes_per_row(),
        )
    }
}

#[cfg(not(target_os = "macos"))]
mod platform {
    use image::RgbaImage;

    use crate::capture::CaptureError;
    use crate::region::Region;

    pub fn grab(_region: &Region) -> Result<RgbaImage, CaptureError> {
        Err(CaptureError::Unsupported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bgra_conversion_drops_padding() {
        // 2x2 image, stride 12 (4 bytes of padding per row)
        let bytes = [
            1, 2, 3, 255, 4, 5, 6, 255, 0, 0, 0, 0, //
            7, 8, 9, 255, 10, 11, 12, 255, 0, 0, 0, 0,
        ];
        let img = bgra_to_rgba(&bytes, 2, 2, 12).unwrap();
        assert_eq!(img.get_pixel(0, 0).0, [3, 2, 1, 255]);
        assert_eq!(img.get_pixel(1, 1).0, [12, 11, 10, 255]);
    }

    #[test]
    fn test_bgra_conversion_short_buffer() {
        let bytes = [0u8; 10];
        assert!(matches!(
            bgra_to_rgba(&bytes, 2, 2, 8),
            Err(CaptureError::InvalidBuffer(_))
        ));
    }

    #[cfg(not(target_os = "macos"))]
    #[test]
    fn test_capture_unsupported() {
        let mut source = ScreenCapture::new(Region::new(0, 0, 10, 10).unwrap());
        assert!(matches!(source.capture(), Err(CaptureError::Unsupported)));
    }
}
