pub mod ocr;
pub mod pdftoppm;
pub mod pdftotext;
pub mod tesseract;

use crate::error::LambertError;
use image::DynamicImage;
use serde::{Deserialize, Serialize};
use std::process::{Command, Output};

const POPPLER_HINT: &str =
    "Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)";
const TESSERACT_HINT: &str = concat!(
    "Install tesseract: brew install tesseract tesseract-lang (macOS) ",
    "or apt install tesseract-ocr tesseract-ocr-fra (Linux)"
);

/// Trait for PDF text-layer backends.
pub trait PdfTextProvider: Send + Sync {
    /// Parse PDF bytes. Fails with `LoadFailed` when the bytes are not a readable PDF.
    fn open(&self, pdf_bytes: &[u8]) -> Result<Box<dyn PdfDocument>, LambertError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// An opened document with a known number of pages.
pub trait PdfDocument {
    fn page_count(&self) -> usize;

    /// Text layer of a 1-based page, or `None` when the page carries no text.
    fn page_text(&self, page_number: usize) -> Result<Option<String>, LambertError>;
}

/// Trait for PDF rasterization backends.
pub trait Rasterizer: Send + Sync {
    /// Render a single 1-based page. `Ok(None)` means the document has no such page.
    fn render(
        &self,
        pdf_bytes: &[u8],
        page_number: usize,
        dpi: u32,
    ) -> Result<Option<DynamicImage>, LambertError>;
}

/// Trait for OCR backends.
pub trait OcrEngine: Send + Sync {
    fn recognize(
        &self,
        image: &DynamicImage,
        language: &str,
        layout: LayoutMode,
    ) -> Result<String, LambertError>;
}

/// Page segmentation hint passed to the OCR engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMode {
    /// Fully automatic segmentation.
    Auto,
    /// A single column of text of variable sizes.
    SingleColumn,
    /// A single uniform block of text.
    #[default]
    SingleBlock,
}

impl LayoutMode {
    /// Tesseract `--psm` value.
    pub fn psm(&self) -> u8 {
        match self {
            LayoutMode::Auto => 3,
            LayoutMode::SingleColumn => 4,
            LayoutMode::SingleBlock => 6,
        }
    }
}

/// Run an external tool, mapping a missing binary to `ToolNotFound`.
///
/// A non-zero exit status is left for the caller to interpret.
fn run_tool(
    tool: &'static str,
    install_hint: &'static str,
    command: &mut Command,
) -> Result<Output, LambertError> {
    command.output().map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            LambertError::ToolNotFound { tool, install_hint }
        } else {
            LambertError::Io(e)
        }
    })
}

fn tool_failed(tool: &'static str, output: &Output) -> LambertError {
    LambertError::ToolFailed {
        tool,
        code: output.status.code().unwrap_or(-1),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    }
}

/// Fail with `ToolNotFound` unless `tool` can be spawned.
///
/// Poppler tools exit non-zero on `-v`, so only a spawn failure counts.
fn require_tool(
    tool: &'static str,
    version_flag: &str,
    install_hint: &'static str,
) -> Result<(), LambertError> {
    run_tool(tool, install_hint, Command::new(tool).arg(version_flag)).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_psm() {
        assert_eq!(LayoutMode::SingleBlock.psm(), 6);
        assert_eq!(LayoutMode::Auto.psm(), 3);
        assert_eq!(LayoutMode::SingleColumn.psm(), 4);
    }

    #[test]
    fn test_missing_tool_maps_to_not_found() {
        let err = run_tool(
            "lambert-no-such-tool",
            POPPLER_HINT,
            &mut Command::new("lambert-no-such-tool"),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            LambertError::ToolNotFound {
                tool: "lambert-no-such-tool",
                ..
            }
        ));
    }

    #[test]
    fn test_require_tool_reports_install_hint() {
        let err = require_tool("lambert-no-such-tool", "-v", TESSERACT_HINT).unwrap_err();
        match err {
            LambertError::ToolNotFound { tool, install_hint } => {
                assert_eq!(tool, "lambert-no-such-tool");
                assert!(install_hint.contains("tesseract-ocr-fra"));
            }
            other => panic!("expected ToolNotFound, got {other:?}"),
        }
    }
}
