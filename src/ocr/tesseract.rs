//! Tesseract command line backend

use std::io::{Cursor, ErrorKind, Write};
use std::process::{Command, Stdio};

use image::{DynamicImage, ImageFormat, RgbaImage};
use tracing::trace;

use super::preprocess::threshold_bright_pixels;
use super::{parse_digits, DigitReader, OcrError};

/// Page segmentation mode 7: treat the image as a single text line
const PSM_SINGLE_LINE: &str = "7";
const DIGIT_WHITELIST: &str = "tessedit_char_whitelist=0123456789";

/// Reads digits by piping a binarised PNG through the `tesseract` binary
#[derive(Debug, Clone)]
pub struct TesseractReader {
    binary: String,
    threshold: u8,
}

impl TesseractReader {
    pub fn new(binary: impl Into<String>, threshold: u8) -> Self {
        Self {
            binary: binary.into(),
            threshold,
        }
    }

    /// Check that the engine can be started at all
    pub fn probe(&self) -> Result<(), OcrError> {
        let output = Command::new(&self.binary)
            .arg("--version")
            .stdin(Stdio::null())
            .output()
            .map_err(|e| self.spawn_error(e))?;

        if !output.status.success() {
            return Err(OcrError::EngineFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.args(["stdin", "stdout", "--psm", PSM_SINGLE_LINE, "-c", DIGIT_WHITELIST])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }

    fn spawn_error(&self, e: std::io::Error) -> OcrError {
        if e.kind() == ErrorKind::NotFound {
            OcrError::EngineMissing(self.binary.clone())
        } else {
            OcrError::Spawn(e)
        }
    }

    fn encode(&self, frame: &RgbaImage) -> Result<Vec<u8>, OcrError> {
        let binary = threshold_bright_pixels(frame, self.threshold);
        let mut png = Vec::new();
        DynamicImage::ImageLuma8(binary).write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
        Ok(png)
    }

    fn recognize(&self, png: &[u8]) -> Result<String, OcrError> {
        let mut child = self.command().spawn().map_err(|e| self.spawn_error(e))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(png).map_err(OcrError::Spawn)?;
        }

        let output = child.wait_with_output().map_err(OcrError::Spawn)?;
        if !output.status.success() {
            return Err(OcrError::EngineFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl DigitReader for TesseractReader {
    fn read(&mut self, frame: &RgbaImage) -> Result<Option<u32>, OcrError> {
        let png = self.encode(frame)?;
        let text = self.recognize(&png)?;
        let reading = parse_digits(&text);
        trace!(raw = text.trim(), ?reading, "ocr result");
        Ok(reading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_arguments() {
        let reader = TesseractReader::new("tesseract", 180);
        let cmd = reader.command();
        assert_eq!(cmd.get_program(), "tesseract");
        let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(
            args,
            vec![
                "stdin",
                "stdout",
                "--psm",
                "7",
                "-c",
                "tessedit_char_whitelist=0123456789"
            ]
        );
    }

    #[test]
    fn test_encode_produces_png() {
        let reader = TesseractReader::new("tesseract", 180);
        let png = reader.encode(&RgbaImage::new(4, 4)).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_missing_engine() {
        let mut reader = TesseractReader::new("definitely-not-tesseract", 180);
        assert!(matches!(reader.probe(), Err(OcrError::EngineMissing(_))));
        assert!(matches!(
            reader.read(&RgbaImage::new(4, 4)),
            Err(OcrError::EngineMissing(_))
        ));
    }
}
