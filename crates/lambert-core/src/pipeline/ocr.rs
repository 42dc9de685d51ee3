use super::{extract_pairs, Progress};
use crate::config::PageErrorPolicy;
use crate::extraction::ocr::OcrTextSource;
use crate::matching::normalize::DecimalStyle;
use crate::matching::CoordinateMatcher;
use crate::model::Pipeline;
use crate::pages::PageRange;
use crate::report::{ExtractionRun, Reporter, StopReason};

/// Visit pages of `range` through OCR until the range or the document ends.
///
/// A page the rasterizer cannot produce ends the run without error. A page
/// that fails to render or recognize is logged, then `policy` decides
/// whether the run stops there or carries on.
pub fn run(
    pdf_bytes: &[u8],
    source: &OcrTextSource<'_>,
    range: PageRange,
    matcher: &dyn CoordinateMatcher,
    policy: PageErrorPolicy,
    on_progress: &mut dyn FnMut(Progress),
) -> ExtractionRun {
    let mut reporter = Reporter::new(Pipeline::Ocr, range);
    let total = range.len();
    let mut stop = StopReason::Completed;

    for (i, page) in range.numbers().enumerate() {
        match source.page_text(pdf_bytes, page) {
            Ok(Some(text)) => {
                let pairs = extract_pairs(&text, matcher, DecimalStyle::CommaToPoint, page);
                log::debug!("page {}: {} pair(s)", page, pairs.len());
                reporter.record_page(page, pairs);
            }
            Ok(None) => {
                log::info!("document ends before page {}", page);
                stop = StopReason::DocumentExhausted { page };
                break;
            }
            Err(e) => {
                log::warn!("page {}: {}", page, e);
                reporter.record_error(page, e.to_string());
                if policy == PageErrorPolicy::Abort {
                    stop = StopReason::Aborted { page };
                    break;
                }
            }
        }

        on_progress(Progress {
            done: i + 1,
            total,
            page,
        });
    }

    reporter.finish(stop)
}
