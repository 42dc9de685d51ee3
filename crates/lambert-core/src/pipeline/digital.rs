use super::{extract_pairs, Progress};
use crate::extraction::PdfDocument;
use crate::matching::normalize::DecimalStyle;
use crate::matching::CoordinateMatcher;
use crate::model::Pipeline;
use crate::pages::PageRange;
use crate::report::{ExtractionRun, Reporter, StopReason};

/// Visit every page of `range` in the text layer of `document`.
///
/// A page without text or failing to read is logged and skipped; the loop
/// always covers the whole range.
pub fn run(
    document: &dyn PdfDocument,
    range: PageRange,
    matcher: &dyn CoordinateMatcher,
    on_progress: &mut dyn FnMut(Progress),
) -> ExtractionRun {
    let mut reporter = Reporter::new(Pipeline::Digital, range);
    let total = range.len();

    for (i, page) in range.numbers().enumerate() {
        match document.page_text(page) {
            Ok(Some(text)) => {
                let pairs = extract_pairs(&text, matcher, DecimalStyle::AsIs, page);
                log::debug!("page {}: {} pair(s)", page, pairs.len());
                reporter.record_page(page, pairs);
            }
            Ok(None) => {
                log::debug!("page {}: no text layer", page);
                reporter.record_no_text(page);
            }
            Err(e) => {
                log::warn!("page {}: {}", page, e);
                reporter.record_error(page, e.to_string());
            }
        }

        on_progress(Progress {
            done: i + 1,
            total,
            page,
        });
    }

    reporter.finish(StopReason::Completed)
}
