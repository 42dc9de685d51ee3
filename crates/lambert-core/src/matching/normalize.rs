use super::RawPair;
use crate::model::CoordinatePair;
use serde::{Deserialize, Serialize};

/// How decimal separators in captured numbers are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecimalStyle {
    /// Numbers are already point-separated; keep them verbatim.
    #[default]
    AsIs,
    /// Rewrite every comma to a point (OCR confuses the two).
    CommaToPoint,
}

/// Rewrite a French-style decimal comma to a point.
///
/// - "123,45" -> "123.45"
/// - "123.45" -> "123.45" (no-op)
pub fn normalize_decimal(s: &str) -> String {
    s.trim().replace(',', ".")
}

/// Turn a raw capture into a `CoordinatePair` for `page`.
pub fn normalize_pair(raw: RawPair<'_>, style: DecimalStyle, page: usize) -> CoordinatePair {
    let (x, y) = match style {
        DecimalStyle::AsIs => (raw.x.trim().to_string(), raw.y.trim().to_string()),
        DecimalStyle::CommaToPoint => (normalize_decimal(raw.x), normalize_decimal(raw.y)),
    };
    CoordinatePair { x, y, page }
}
