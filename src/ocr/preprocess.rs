use image::{GrayImage, Luma, RgbaImage};

/// Grayscale then binarise: pixels brighter than `threshold` become white,
/// everything else black
pub fn threshold_bright_pixels(frame: &RgbaImage, threshold: u8) -> GrayImage {
    let mut gray = image::imageops::grayscale(frame);
    for Luma([v]) in gray.pixels_mut() {
        *v = if *v > threshold { 255 } else { 0 };
    }
    gray
}
