use super::{require_tool, run_tool, tool_failed, Rasterizer, POPPLER_HINT};
use crate::error::LambertError;
use image::DynamicImage;
use std::process::Command;

/// Rasterizer built on poppler's `pdftoppm`, one page per call.
pub struct PdftoppmRasterizer;

impl PdftoppmRasterizer {
    pub fn new() -> Self {
        PdftoppmRasterizer
    }

    /// Fail with `ToolNotFound` unless pdftoppm can be run.
    pub fn ensure_available() -> Result<(), LambertError> {
        require_tool("pdftoppm", "-v", POPPLER_HINT)
    }
}

impl Default for PdftoppmRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer for PdftoppmRasterizer {
    fn render(
        &self,
        pdf_bytes: &[u8],
        page_number: usize,
        dpi: u32,
    ) -> Result<Option<DynamicImage>, LambertError> {
        if page_number == 0 {
            return Ok(None);
        }

        let dir = tempfile::tempdir()?;
        let input = dir.path().join("input.pdf");
        std::fs::write(&input, pdf_bytes)?;
        let prefix = dir.path().join("page");

        let page = page_number.to_string();
        let output = run_tool(
            "pdftoppm",
            POPPLER_HINT,
            Command::new("pdftoppm")
                .args(["-png", "-singlefile"])
                .args(["-r", dpi.to_string().as_str()])
                .args(["-f", page.as_str(), "-l", page.as_str()])
                .arg(&input)
                .arg(&prefix),
        )?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if is_past_last_page(&stderr) {
                log::debug!("pdftoppm: page {} is past the end of the document", page_number);
                return Ok(None);
            }
            return Err(tool_failed("pdftoppm", &output));
        }

        // -singlefile writes "<prefix>.png" without a page suffix.
        let image_path = prefix.with_extension("png");
        if !image_path.exists() {
            return Ok(None);
        }

        Ok(Some(image::open(&image_path)?))
    }
}

/// pdftoppm refuses a first page beyond the last one with this message.
fn is_past_last_page(stderr: &str) -> bool {
    stderr.contains("Wrong page range")
}
