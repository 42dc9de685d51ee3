use serde::{Deserialize, Serialize};
use std::fmt;

/// Which text source a run reads pages from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pipeline {
    /// Embedded text layer of digitally produced PDFs.
    Digital,
    /// Rasterized pages read back through OCR.
    Ocr,
}

impl Pipeline {
    /// File name offered for the coordinate download.
    pub fn output_file_name(&self) -> &'static str {
        match self {
            Pipeline::Digital => "coordonnees_lambert.txt",
            Pipeline::Ocr => "coordonnees_lambert_ocr.txt",
        }
    }
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pipeline::Digital => write!(f, "digital"),
            Pipeline::Ocr => write!(f, "ocr"),
        }
    }
}

/// A normalized Lambert coordinate pair found on one page.
///
/// `x` and `y` keep the textual form of the document (point as decimal
/// separator). No range or plausibility check is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoordinatePair {
    pub x: String,
    pub y: String,
    /// 1-based page number the pair was read from.
    pub page: usize,
}

impl fmt::Display for CoordinatePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageOutcome {
    Found,
    NotFound,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// 1-based page number.
    pub page: usize,
    pub outcome: PageOutcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl LogEntry {
    pub fn found(page: usize, pair: &CoordinatePair) -> Self {
        LogEntry {
            page,
            outcome: PageOutcome::Found,
            detail: Some(format!("{}, {}", pair.x, pair.y)),
        }
    }

    pub fn not_found(page: usize, detail: Option<String>) -> Self {
        LogEntry {
            page,
            outcome: PageOutcome::NotFound,
            detail,
        }
    }

    pub fn error(page: usize, message: impl Into<String>) -> Self {
        LogEntry {
            page,
            outcome: PageOutcome::Error,
            detail: Some(message.into()),
        }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.outcome, &self.detail) {
            (PageOutcome::Found, Some(d)) => write!(f, "Page {}: found -> {}", self.page, d),
            (PageOutcome::Found, None) => write!(f, "Page {}: found", self.page),
            (PageOutcome::NotFound, Some(d)) => {
                write!(f, "Page {}: no coordinates found ({})", self.page, d)
            }
            (PageOutcome::NotFound, None) => write!(f, "Page {}: no coordinates found", self.page),
            (PageOutcome::Error, Some(d)) => write!(f, "Page {}: error: {}", self.page, d),
            (PageOutcome::Error, None) => write!(f, "Page {}: error", self.page),
        }
    }
}
