use super::{require_tool, run_tool, tool_failed, PdfDocument, PdfTextProvider, POPPLER_HINT};
use crate::error::LambertError;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

/// Text-layer backend built on poppler-utils (`pdfinfo` and `pdftotext`).
pub struct PdftotextProvider;

impl PdftotextProvider {
    pub fn new() -> Self {
        PdftotextProvider
    }

    /// Fail with `ToolNotFound` unless pdfinfo and pdftotext can be run.
    pub fn ensure_available() -> Result<(), LambertError> {
        require_tool("pdfinfo", "-v", POPPLER_HINT)?;
        require_tool("pdftotext", "-v", POPPLER_HINT)
    }
}

impl Default for PdftotextProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfTextProvider for PdftotextProvider {
    fn open(&self, pdf_bytes: &[u8]) -> Result<Box<dyn PdfDocument>, LambertError> {
        if pdf_bytes.is_empty() {
            return Err(LambertError::LoadFailed("file is empty".into()));
        }

        let mut file = NamedTempFile::new()?;
        file.write_all(pdf_bytes)?;
        file.flush()?;

        let output = run_tool(
            "pdfinfo",
            POPPLER_HINT,
            Command::new("pdfinfo").arg(file.path()),
        )?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(LambertError::LoadFailed(stderr.trim().to_string()));
        }

        let info = String::from_utf8_lossy(&output.stdout);
        let page_count = parse_page_count(&info).ok_or_else(|| {
            LambertError::LoadFailed("pdfinfo did not report a page count".into())
        })?;
        log::debug!("opened PDF with {} page(s)", page_count);

        Ok(Box::new(PopplerDocument { file, page_count }))
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

/// A PDF spilled to a temp file for the poppler tools to read.
struct PopplerDocument {
    file: NamedTempFile,
    page_count: usize,
}

impl PdfDocument for PopplerDocument {
    fn page_count(&self) -> usize {
        self.page_count
    }

    fn page_text(&self, page_number: usize) -> Result<Option<String>, LambertError> {
        if page_number == 0 || page_number > self.page_count {
            return Err(LambertError::PageRead {
                page: page_number,
                reason: format!("document has {} page(s)", self.page_count),
            });
        }

        let page = page_number.to_string();
        let output = run_tool(
            "pdftotext",
            POPPLER_HINT,
            Command::new("pdftotext")
                .args(["-enc", "UTF-8", "-f", page.as_str(), "-l", page.as_str()])
                .arg(self.file.path())
                .arg("-"), // output to stdout
        )?;

        if !output.status.success() {
            return Err(tool_failed("pdftotext", &output));
        }

        Ok(clean_page_text(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Read the `Pages:` line of pdfinfo output.
fn parse_page_count(info: &str) -> Option<usize> {
    info.lines()
        .find_map(|line| line.strip_prefix("Pages:"))
        .and_then(|rest| rest.trim().parse().ok())
}

/// Drop pdftotext's form feed page separators; blank pages yield `None`.
fn clean_page_text(raw: &str) -> Option<String> {
    let text = raw.replace('\x0c', "");
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}
