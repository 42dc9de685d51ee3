use crate::model::{CoordinatePair, LogEntry, PageOutcome, Pipeline};
use crate::pages::PageRange;
use serde::Serialize;

pub const TEXT_MIME: &str = "text/plain";

/// Why a run stopped iterating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum StopReason {
    /// Every page of the resolved range was visited.
    Completed,
    /// The document ran out of pages at `page` (OCR pipeline only).
    DocumentExhausted { page: usize },
    /// A page error at `page` ended the run (OCR pipeline only).
    Aborted { page: usize },
}

/// Overall result of a run, distinct from an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Found(usize),
    Empty,
}

/// Coordinate file ready to hand to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub file_name: &'static str,
    pub mime: &'static str,
    pub content: String,
}

/// Everything one extraction produced over one page range of one document.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionRun {
    pub pipeline: Pipeline,
    pub range: PageRange,
    pub pages_processed: usize,
    pub pairs: Vec<CoordinatePair>,
    pub logs: Vec<LogEntry>,
    pub stop: StopReason,
}

impl ExtractionRun {
    pub fn status(&self) -> RunStatus {
        if self.pairs.is_empty() {
            RunStatus::Empty
        } else {
            RunStatus::Found(self.pairs.len())
        }
    }

    /// One `x,y` line per pair in encounter order, without a trailing newline.
    pub fn to_text(&self) -> String {
        self.pairs
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn log_lines(&self) -> Vec<String> {
        self.logs.iter().map(|l| l.to_string()).collect()
    }

    pub fn error_count(&self) -> usize {
        self.logs
            .iter()
            .filter(|l| l.outcome == PageOutcome::Error)
            .count()
    }

    /// The coordinate file, or `None` when nothing was found.
    pub fn download(&self) -> Option<Download> {
        if self.pairs.is_empty() {
            return None;
        }
        Some(Download {
            file_name: self.pipeline.output_file_name(),
            mime: TEXT_MIME,
            content: self.to_text(),
        })
    }
}

/// Accumulates pairs and log entries while pages are visited.
#[derive(Debug)]
pub struct Reporter {
    pipeline: Pipeline,
    range: PageRange,
    pages_processed: usize,
    pairs: Vec<CoordinatePair>,
    logs: Vec<LogEntry>,
}

impl Reporter {
    pub fn new(pipeline: Pipeline, range: PageRange) -> Self {
        Reporter {
            pipeline,
            range,
            pages_processed: 0,
            pairs: Vec::new(),
            logs: Vec::new(),
        }
    }

    /// Record the pairs of one page; an empty list logs a not-found entry.
    pub fn record_page(&mut self, page: usize, pairs: Vec<CoordinatePair>) {
        self.pages_processed += 1;
        if pairs.is_empty() {
            self.logs.push(LogEntry::not_found(page, None));
            return;
        }
        for pair in pairs {
            self.logs.push(LogEntry::found(page, &pair));
            self.pairs.push(pair);
        }
    }

    /// Record a page that yielded no text at all.
    pub fn record_no_text(&mut self, page: usize) {
        self.pages_processed += 1;
        self.logs
            .push(LogEntry::not_found(page, Some("no extractable text".into())));
    }

    pub fn record_error(&mut self, page: usize, message: impl Into<String>) {
        self.pages_processed += 1;
        self.logs.push(LogEntry::error(page, message));
    }

    pub fn finish(self, stop: StopReason) -> ExtractionRun {
        ExtractionRun {
            pipeline: self.pipeline,
            range: self.range,
            pages_processed: self.pages_processed,
            pairs: self.pairs,
            logs: self.logs,
            stop,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::{resolve_known, PageRequest};

    fn pair(x: &str, y: &str, page: usize) -> CoordinatePair {
        CoordinatePair {
            x: x.into(),
            y: y.into(),
            page,
        }
    }

    fn reporter() -> Reporter {
        Reporter::new(Pipeline::Digital, resolve_known(PageRequest::new(1, 3), 3))
    }

    #[test]
    fn test_text_keeps_encounter_order() {
        let mut r = reporter();
        r.record_page(1, vec![pair("1", "2", 1), pair("3", "4", 1)]);
        r.record_page(2, vec![]);
        r.record_page(3, vec![pair("5", "6", 3)]);
        let run = r.finish(StopReason::Completed);

        assert_eq!(run.to_text(), "1,2\n3,4\n5,6");
        assert_eq!(run.status(), RunStatus::Found(3));
        assert_eq!(run.pages_processed, 3);
        assert_eq!(
            run.log_lines(),
            vec![
                "Page 1: found -> 1, 2",
                "Page 1: found -> 3, 4",
                "Page 2: no coordinates found",
                "Page 3: found -> 5, 6",
            ]
        );
    }

    #[test]
    fn test_empty_run_has_no_download() {
        let mut r = reporter();
        r.record_no_text(1);
        let run = r.finish(StopReason::Completed);
        assert_eq!(run.status(), RunStatus::Empty);
        assert!(run.download().is_none());
        assert_eq!(run.to_text(), "");
        assert_eq!(run.error_count(), 0);
    }

    #[test]
    fn test_download() {
        let mut r = Reporter::new(Pipeline::Ocr, resolve_known(PageRequest::new(1, 1), 1));
        r.record_page(1, vec![pair("601234.5", "2412345.6", 1)]);
        let download = r.finish(StopReason::Completed).download().unwrap();
        assert_eq!(download.file_name, "coordonnees_lambert_ocr.txt");
        assert_eq!(download.mime, "text/plain");
        assert_eq!(download.content, "601234.5,2412345.6");
    }

    #[test]
    fn test_errors_counted() {
        let mut r = reporter();
        r.record_error(1, "boom");
        let run = r.finish(StopReason::Aborted { page: 1 });
        assert_eq!(run.error_count(), 1);
        assert_eq!(run.log_lines(), vec!["Page 1: error: boom"]);
    }

    #[test]
    fn test_run_serializes_stop_reason() {
        let run = reporter().finish(StopReason::DocumentExhausted { page: 4 });
        let json = serde_json::to_value(&run).unwrap();
        assert_eq!(json["stop"]["kind"], "document_exhausted");
        assert_eq!(json["stop"]["page"], 4);
        assert_eq!(json["pipeline"], "digital");
    }
}
