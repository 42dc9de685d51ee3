pub mod digital;
pub mod ocr;

use crate::matching::normalize::{normalize_pair, DecimalStyle};
use crate::matching::CoordinateMatcher;
use crate::model::CoordinatePair;

/// Progress after one page has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Pages handled so far, including this one.
    pub done: usize,
    /// Pages in the resolved range (an estimate for the OCR pipeline).
    pub total: usize,
    /// 1-based number of the page just handled.
    pub page: usize,
}

impl Progress {
    /// Completion in `0.0..=1.0`.
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            return 1.0;
        }
        (self.done as f32 / self.total as f32).min(1.0)
    }
}

/// Run the matcher over one page of text and normalize every capture.
pub fn extract_pairs(
    text: &str,
    matcher: &dyn CoordinateMatcher,
    style: DecimalStyle,
    page: usize,
) -> Vec<CoordinatePair> {
    matcher
        .find_pairs(text)
        .into_iter()
        .map(|raw| normalize_pair(raw, style, page))
        .collect()
}
