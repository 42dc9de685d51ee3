use crate::error::LambertError;
use crate::extraction::LayoutMode;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What the OCR pipeline does after a page fails to render or recognize.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageErrorPolicy {
    /// Log the error and stop the run.
    #[default]
    Abort,
    /// Log the error and move on to the next page.
    Skip,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrSettings {
    /// Rasterization resolution.
    pub dpi: u32,
    /// Share of the page width, from the left edge, handed to OCR.
    pub crop_fraction: f32,
    /// Tesseract language code.
    pub language: String,
    pub layout: LayoutMode,
    pub on_page_error: PageErrorPolicy,
    /// Pages to try from the start page when the caller gives no end page.
    pub page_estimate: usize,
}

impl Default for OcrSettings {
    fn default() -> Self {
        OcrSettings {
            dpi: 300,
            crop_fraction: 0.35,
            language: "fra".into(),
            layout: LayoutMode::SingleBlock,
            on_page_error: PageErrorPolicy::Abort,
            page_estimate: 10,
        }
    }
}

impl OcrSettings {
    /// End page for an open-ended request starting at `start`.
    pub fn default_end(&self, start: usize) -> usize {
        start
            .max(1)
            .saturating_add(self.page_estimate.saturating_sub(1))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub ocr: OcrSettings,
}

/// Load a config from a JSON file.
pub fn load_config(path: &Path) -> Result<ExtractionConfig, LambertError> {
    let content = std::fs::read_to_string(path).map_err(|e| LambertError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let config: ExtractionConfig =
        serde_json::from_str(&content).map_err(|e| LambertError::ConfigLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_config(&config)?;
    Ok(config)
}

/// Parse a config from a JSON string (no file path context).
pub fn parse_config(json: &str) -> Result<ExtractionConfig, LambertError> {
    let config: ExtractionConfig = serde_json::from_str(json)?;
    validate_config(&config)?;
    Ok(config)
}

pub fn validate_config(config: &ExtractionConfig) -> Result<(), LambertError> {
    let ocr = &config.ocr;

    if ocr.dpi == 0 {
        return Err(LambertError::InvalidConfig("ocr.dpi must be positive".into()));
    }

    if !(ocr.crop_fraction > 0.0 && ocr.crop_fraction <= 1.0) {
        return Err(LambertError::InvalidConfig(format!(
            "ocr.crop_fraction must be in (0, 1], got {}",
            ocr.crop_fraction
        )));
    }

    if ocr.language.trim().is_empty() {
        return Err(LambertError::InvalidConfig(
            "ocr.language must not be empty".into(),
        ));
    }

    if ocr.page_estimate == 0 {
        return Err(LambertError::InvalidConfig(
            "ocr.page_estimate must be at least 1".into(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_gives_defaults() {
        let config = parse_config("{}").unwrap();
        assert_eq!(config, ExtractionConfig::default());
        assert_eq!(config.ocr.dpi, 300);
        assert_eq!(config.ocr.crop_fraction, 0.35);
        assert_eq!(config.ocr.language, "fra");
        assert_eq!(config.ocr.layout, LayoutMode::SingleBlock);
        assert_eq!(config.ocr.on_page_error, PageErrorPolicy::Abort);
    }

    #[test]
    fn test_partial_override() {
        let config = parse_config(
            r#"{"ocr": {"dpi": 200, "on_page_error": "skip", "layout": "auto"}}"#,
        )
        .unwrap();
        assert_eq!(config.ocr.dpi, 200);
        assert_eq!(config.ocr.on_page_error, PageErrorPolicy::Skip);
        assert_eq!(config.ocr.layout, LayoutMode::Auto);
        assert_eq!(config.ocr.language, "fra");
    }

    #[test]
    fn test_rejects_bad_crop() {
        let err = parse_config(r#"{"ocr": {"crop_fraction": 1.5}}"#).unwrap_err();
        assert!(matches!(err, LambertError::InvalidConfig(_)));
        let err = parse_config(r#"{"ocr": {"crop_fraction": 0.0}}"#).unwrap_err();
        assert!(matches!(err, LambertError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_zero_dpi() {
        assert!(parse_config(r#"{"ocr": {"dpi": 0}}"#).is_err());
    }

    #[test]
    fn test_default_end_counts_from_start() {
        let ocr = OcrSettings::default();
        assert_eq!(ocr.default_end(1), 10);
        assert_eq!(ocr.default_end(12), 21);
        assert_eq!(ocr.default_end(0), 10);
        assert_eq!(ocr.default_end(usize::MAX), usize::MAX);

        let single = OcrSettings {
            page_estimate: 1,
            ..OcrSettings::default()
        };
        assert_eq!(single.default_end(5), 5);
    }

    #[test]
    fn test_rejects_unknown_policy() {
        let err = parse_config(r#"{"ocr": {"on_page_error": "retry"}}"#).unwrap_err();
        assert!(matches!(err, LambertError::Json(_)));
    }

    #[test]
    fn test_load_config_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"{ not json").unwrap();
        let err = load_config(file.path()).unwrap_err();
        match err {
            LambertError::ConfigLoad { path, .. } => assert_eq!(path, file.path()),
            other => panic!("unexpected error: {other}"),
        }
    }
}
