use serde::{Deserialize, Serialize};

/// Page bounds as entered by the user: 1-based and inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub start: usize,
    pub end: usize,
}

impl PageRequest {
    pub fn new(start: usize, end: usize) -> Self {
        PageRequest { start, end }
    }
}

/// A resolved, bounded run of pages, stored 1-based and inclusive.
///
/// An empty range is represented with `start > end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRange {
    start: usize,
    end: usize,
}

impl PageRange {
    fn empty() -> Self {
        PageRange { start: 1, end: 0 }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    pub fn len(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.end - self.start + 1
        }
    }

    /// 1-based page numbers in increasing order.
    pub fn numbers(&self) -> impl Iterator<Item = usize> {
        // An inclusive range with start > end is already empty.
        self.start..=self.end
    }

    /// 0-based page indices in increasing order.
    pub fn indices(&self) -> impl Iterator<Item = usize> {
        self.numbers().map(|n| n - 1)
    }
}

/// Resolve a request against a document whose page count is known.
///
/// Both bounds are clamped to `[1, total_pages]`.
pub fn resolve_known(request: PageRequest, total_pages: usize) -> PageRange {
    if total_pages == 0 {
        return PageRange::empty();
    }
    let start = request.start.clamp(1, total_pages);
    let end = request.end.clamp(1, total_pages);
    if start > end {
        return PageRange::empty();
    }
    PageRange { start, end }
}

/// Resolve a request when the page count is unknown.
///
/// `end` is taken as the user's estimate; the text source ends the run
/// early once the document runs out of pages.
pub fn resolve_open(request: PageRequest) -> PageRange {
    let start = request.start.max(1);
    if start > request.end {
        return PageRange::empty();
    }
    PageRange {
        start,
        end: request.end,
    }
}
