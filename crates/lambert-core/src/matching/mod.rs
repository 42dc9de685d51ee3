pub mod normalize;

use crate::error::LambertError;
use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;

/// Label, anything up to a colon, then `X [m], Y`.
const DIGITAL_PATTERN: &str = r"Lambert\s+2.*:\s*([0-9.]+)\s*(?:m|)\s*,\s*([0-9.]+)";

/// Label, lazy filler, a 6-7 digit X and a 7 digit Y, each with an
/// optional fractional part. Any non-digit run may separate X and Y since
/// OCR routinely garbles the `m,` between them. Y must not run on into
/// another digit, but a unit may be glued to it (`2412345.67m`).
const OCR_PATTERN: &str =
    r"lambert.*?\b(\d{6,7}(?:[.,]\d+)?)\D+?(\d{7}(?:[.,]\d+)?)(?:\D|$)";

static DIGITAL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DIGITAL_PATTERN).expect("digital pattern compiles"));

static OCR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(OCR_PATTERN)
        .case_insensitive(true)
        .build()
        .expect("ocr pattern compiles")
});

/// One `(x, y)` capture, borrowed from the scanned text and not yet normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawPair<'t> {
    pub x: &'t str,
    pub y: &'t str,
}

/// Strategy for locating labeled coordinate pairs in a block of page text.
pub trait CoordinateMatcher: Send + Sync {
    /// All pairs in `text`, in order of appearance.
    fn find_pairs<'t>(&self, text: &'t str) -> Vec<RawPair<'t>>;

    /// Name of this matcher (for diagnostics).
    fn name(&self) -> &str;
}

/// Regex matcher whose first two capture groups are X and Y.
#[derive(Debug, Clone)]
pub struct LabelPatternMatcher {
    name: String,
    regex: Regex,
}

impl LabelPatternMatcher {
    /// Strict, case-sensitive pattern for text-layer extraction.
    pub fn digital() -> Self {
        LabelPatternMatcher {
            name: "digital".into(),
            regex: DIGITAL_REGEX.clone(),
        }
    }

    /// Case-insensitive, digit-length constrained pattern for OCR text.
    pub fn ocr() -> Self {
        LabelPatternMatcher {
            name: "ocr".into(),
            regex: OCR_REGEX.clone(),
        }
    }

    /// Build a matcher from a custom pattern with exactly two capture groups.
    pub fn new(name: &str, pattern: &str, case_insensitive: bool) -> Result<Self, LambertError> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(case_insensitive)
            .build()
            .map_err(|e| LambertError::InvalidPattern(e.to_string()))?;

        // captures_len counts the implicit whole-match group.
        let groups = regex.captures_len() - 1;
        if groups != 2 {
            return Err(LambertError::InvalidPattern(format!(
                "expected 2 capture groups (X and Y), found {}",
                groups
            )));
        }

        Ok(LabelPatternMatcher {
            name: name.to_string(),
            regex,
        })
    }
}

impl CoordinateMatcher for LabelPatternMatcher {
    fn find_pairs<'t>(&self, text: &'t str) -> Vec<RawPair<'t>> {
        self.regex
            .captures_iter(text)
            .filter_map(|caps| {
                let x = caps.get(1)?.as_str();
                let y = caps.get(2)?.as_str();
                if !has_digit(x) || !has_digit(y) {
                    return None;
                }
                Some(RawPair { x, y })
            })
            .collect()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// A capture like "." satisfies `[0-9.]+` but is not a number.
fn has_digit(s: &str) -> bool {
    s.bytes().any(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digital_single_pair() {
        let m = LabelPatternMatcher::digital();
        let pairs = m.find_pairs("Lambert 2 étendu: 123456.78 m, 7654321.12,L2E");
        assert_eq!(
            pairs,
            vec![RawPair {
                x: "123456.78",
                y: "7654321.12"
            }]
        );
    }

    #[test]
    fn test_digital_without_unit_marker() {
        let m = LabelPatternMatcher::digital();
        let pairs = m.find_pairs("Lambert 2 étendu:601234.5,2412345.6");
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].x, "601234.5");
        assert_eq!(pairs[0].y, "2412345.6");
    }

    #[test]
    fn test_digital_multiple_lines() {
        let m = LabelPatternMatcher::digital();
        let text = "Parcelle A\n\
                    Lambert 2 étendu: 600000.10 m, 2400000.20,L2E\n\
                    Parcelle B\n\
                    Lambert 2 étendu: 600100.30 m, 2400100.40,L2E\n";
        let pairs = m.find_pairs(text);
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].x, "600000.10");
        assert_eq!(pairs[1].y, "2400100.40");
    }

    #[test]
    fn test_digital_is_case_sensitive() {
        let m = LabelPatternMatcher::digital();
        assert!(m.find_pairs("LAMBERT 2 étendu: 123456.78 m, 7654321.12").is_empty());
    }

    #[test]
    fn test_digital_rejects_decimal_comma() {
        // The text layer is expected to use points; a decimal comma is
        // read as the X/Y separator.
        let m = LabelPatternMatcher::digital();
        let pairs = m.find_pairs("Lambert 2 étendu: 123456,78 m");
        assert_eq!(pairs, vec![RawPair { x: "123456", y: "78" }]);
    }

    #[test]
    fn test_digital_no_label() {
        let m = LabelPatternMatcher::digital();
        assert!(m.find_pairs("Coordonnées: 123456.78 m, 7654321.12").is_empty());
        assert!(m.find_pairs("").is_empty());
    }

    #[test]
    fn test_ocr_noisy_text() {
        let m = LabelPatternMatcher::ocr();
        let pairs = m.find_pairs("Lambert Z etendu 123456,78 xx 7654321,12");
        assert_eq!(
            pairs,
            vec![RawPair {
                x: "123456,78",
                y: "7654321,12"
            }]
        );
    }

    #[test]
    fn test_digital_skips_captures_without_digits() {
        let m = LabelPatternMatcher::digital();
        assert!(m.find_pairs("Lambert 2 étendu: . m, .").is_empty());
        assert!(m.find_pairs("Lambert 2 étendu: 601234.5 m, .").is_empty());
    }

    #[test]
    fn test_ocr_unit_glued_to_numbers() {
        let m = LabelPatternMatcher::ocr();
        let pairs = m.find_pairs("Lambert 2 etendu: 601234.56m,2412345.67m,L2E");
        assert_eq!(
            pairs,
            vec![RawPair {
                x: "601234.56",
                y: "2412345.67"
            }]
        );
    }

    #[test]
    fn test_ocr_keeps_long_fractions() {
        let m = LabelPatternMatcher::ocr();
        let pairs = m.find_pairs("lambert 2: 601234,5678 m, 2412345,6789");
        assert_eq!(
            pairs,
            vec![RawPair {
                x: "601234,5678",
                y: "2412345,6789"
            }]
        );
    }

    #[test]
    fn test_ocr_case_insensitive_with_label_digit() {
        let m = LabelPatternMatcher::ocr();
        let pairs = m.find_pairs("LAMBERT 2 ÉTENDU: 601234.56 m, 2412345.67,L2E");
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].x, "601234.56");
        assert_eq!(pairs[0].y, "2412345.67");
    }

    #[test]
    fn test_ocr_integer_pair_with_bare_comma() {
        let m = LabelPatternMatcher::ocr();
        let pairs = m.find_pairs("lambert 2 etendu: 601234,2412345");
        assert_eq!(
            pairs,
            vec![RawPair {
                x: "601234",
                y: "2412345"
            }]
        );
    }

    #[test]
    fn test_ocr_rejects_wrong_digit_lengths() {
        let m = LabelPatternMatcher::ocr();
        // X too short, Y too long.
        assert!(m.find_pairs("Lambert 2: 12345,6 m, 7654321,12").is_empty());
        assert!(m.find_pairs("Lambert 2: 123456,78 m, 76543210,12").is_empty());
    }

    #[test]
    fn test_matching_is_idempotent() {
        let m = LabelPatternMatcher::ocr();
        let text = "lambert 2: 600000,1 m 2400000,2 ... Lambert 2: 600001,1 m 2400001,2";
        let first = m.find_pairs(text);
        let second = m.find_pairs(text);
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_custom_pattern() {
        let m = LabelPatternMatcher::new("xy", r"X=(\d+) Y=(\d+)", false).unwrap();
        assert_eq!(m.name(), "xy");
        assert_eq!(m.find_pairs("X=1 Y=2"), vec![RawPair { x: "1", y: "2" }]);
    }

    #[test]
    fn test_custom_pattern_needs_two_groups() {
        assert!(matches!(
            LabelPatternMatcher::new("bad", r"X=(\d+)", false),
            Err(LambertError::InvalidPattern(_))
        ));
        assert!(matches!(
            LabelPatternMatcher::new("bad", r"X=(\d+", false),
            Err(LambertError::InvalidPattern(_))
        ));
    }
}
