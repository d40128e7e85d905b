//! Digit recognition
//!
//! A frame is binarised and handed to tesseract in single-line,
//! digits-only mode. Anything that does not parse as a plain non-negative
//! integer becomes "no reading".

mod preprocess;
mod tesseract;

use image::RgbaImage;

pub use preprocess::threshold_bright_pixels;
pub use tesseract::TesseractReader;

/// Turns a captured frame into an optional integer
pub trait DigitReader {
    fn read(&mut self, frame: &RgbaImage) -> Result<Option<u32>, OcrError>;
}

/// Errors from the OCR engine itself. Unreadable text is not an error.
#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    #[error("'{0}' not found - install Tesseract OCR (e.g. `brew install tesseract`)")]
    EngineMissing(String),

    #[error("failed to run OCR engine: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("failed to encode frame for OCR: {0}")]
    Encode(#[from] image::ImageError),

    #[error("OCR engine exited with {status}: {stderr}")]
    EngineFailed { status: String, stderr: String },
}

/// Parse recognizer output into a reading
pub fn parse_digits(text: &str) -> Option<u32> {
    let text = text.trim();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_digits() {
        assert_eq!(parse_digits("4"), Some(4));
        assert_eq!(parse_digits("12\n\x0c"), Some(12));
        assert_eq!(parse_digits("  07 "), Some(7));
        assert_eq!(parse_digits("0"), Some(0));
    }

    #[test]
    fn test_parse_digits_rejects_noise() {
        assert_eq!(parse_digits(""), None);
        assert_eq!(parse_digits("\n"), None);
        assert_eq!(parse_digits("1 2"), None);
        assert_eq!(parse_digits("+3"), None);
        assert_eq!(parse_digits("-3"), None);
        assert_eq!(parse_digits("3a"), None);
        assert_eq!(parse_digits("99999999999999999999"), None);
    }
}
