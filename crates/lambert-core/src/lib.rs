pub mod config;
pub mod error;
pub mod extraction;
pub mod matching;
pub mod model;
pub mod pages;
pub mod pipeline;
pub mod report;

use error::LambertError;
use extraction::ocr::OcrTextSource;
use extraction::PdfTextProvider;
use matching::{CoordinateMatcher, LabelPatternMatcher};
use pages::{resolve_known, resolve_open, PageRequest};
use pipeline::Progress;
use report::{ExtractionRun, RunStatus};

/// Number of pages of a digitally produced PDF.
pub fn page_count(pdf_bytes: &[u8], provider: &dyn PdfTextProvider) -> Result<usize, LambertError> {
    Ok(provider.open(pdf_bytes)?.page_count())
}

/// Main API entry point for digitally produced PDFs: scan the text layer
/// of the requested pages for Lambert 2 coordinates.
///
/// Fails only when the document cannot be loaded. Page-level problems end
/// up in the run's log entries.
pub fn extract_digital(
    pdf_bytes: &[u8],
    provider: &dyn PdfTextProvider,
    request: PageRequest,
    on_progress: &mut dyn FnMut(Progress),
) -> Result<ExtractionRun, LambertError> {
    extract_digital_with_matcher(
        pdf_bytes,
        provider,
        request,
        &LabelPatternMatcher::digital(),
        on_progress,
    )
}

pub fn extract_digital_with_matcher(
    pdf_bytes: &[u8],
    provider: &dyn PdfTextProvider,
    request: PageRequest,
    matcher: &dyn CoordinateMatcher,
    on_progress: &mut dyn FnMut(Progress),
) -> Result<ExtractionRun, LambertError> {
    let document = provider.open(pdf_bytes)?;
    let range = resolve_known(request, document.page_count());
    log::info!(
        "{}: scanning pages {}..={} of {} with '{}' matcher",
        provider.backend_name(),
        range.start(),
        range.end(),
        document.page_count(),
        matcher.name()
    );

    let run = pipeline::digital::run(document.as_ref(), range, matcher, on_progress);
    log_summary(&run);
    Ok(run)
}

/// Main API entry point for scanned PDFs: OCR the left margin of each
/// requested page and look for Lambert 2 coordinates.
///
/// `request.end` is an estimate; the run stops early once the document
/// runs out of pages. What happens after a failing page follows the
/// source's `on_page_error` setting.
pub fn extract_ocr(
    pdf_bytes: &[u8],
    source: &OcrTextSource<'_>,
    request: PageRequest,
    on_progress: &mut dyn FnMut(Progress),
) -> Result<ExtractionRun, LambertError> {
    extract_ocr_with_matcher(
        pdf_bytes,
        source,
        request,
        &LabelPatternMatcher::ocr(),
        on_progress,
    )
}

pub fn extract_ocr_with_matcher(
    pdf_bytes: &[u8],
    source: &OcrTextSource<'_>,
    request: PageRequest,
    matcher: &dyn CoordinateMatcher,
    on_progress: &mut dyn FnMut(Progress),
) -> Result<ExtractionRun, LambertError> {
    source.validate_document(pdf_bytes)?;
    let range = resolve_open(request);
    let settings = source.settings();
    log::info!(
        "ocr: scanning pages {}..={} (estimate) at {} dpi, lang={}",
        range.start(),
        range.end(),
        settings.dpi,
        settings.language
    );

    let run = pipeline::ocr::run(
        pdf_bytes,
        source,
        range,
        matcher,
        settings.on_page_error,
        on_progress,
    );
    log_summary(&run);
    Ok(run)
}

fn log_summary(run: &ExtractionRun) {
    match run.status() {
        RunStatus::Found(n) => log::info!(
            "{} coordinate pair(s) over {} page(s), stop: {:?}",
            n,
            run.pages_processed,
            run.stop
        ),
        RunStatus::Empty => log::warn!(
            "no coordinates found over {} page(s), stop: {:?}",
            run.pages_processed,
            run.stop
        ),
    }
}
