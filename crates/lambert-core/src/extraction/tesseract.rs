use super::{require_tool, run_tool, tool_failed, LayoutMode, OcrEngine, TESSERACT_HINT};
use crate::error::LambertError;
use image::{DynamicImage, ImageFormat};
use std::process::Command;

/// OCR engine that shells out to the `tesseract` binary.
pub struct TesseractEngine;

impl TesseractEngine {
    pub fn new() -> Self {
        TesseractEngine
    }

    /// Fail with `ToolNotFound` unless tesseract can be run.
    pub fn ensure_available() -> Result<(), LambertError> {
        require_tool("tesseract", "--version", TESSERACT_HINT)
    }
}

impl Default for TesseractEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl OcrEngine for TesseractEngine {
    fn recognize(
        &self,
        image: &DynamicImage,
        language: &str,
        layout: LayoutMode,
    ) -> Result<String, LambertError> {
        let file = tempfile::Builder::new()
            .prefix("lambert-ocr-")
            .suffix(".png")
            .tempfile()?;
        image.save_with_format(file.path(), ImageFormat::Png)?;

        let output = run_tool(
            "tesseract",
            TESSERACT_HINT,
            Command::new("tesseract")
                .arg(file.path())
                .arg("stdout")
                .args(["-l", language])
                .args(["--psm", layout.psm().to_string().as_str()]),
        )?;

        if !output.status.success() {
            return Err(tool_failed("tesseract", &output));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
