use super::{OcrEngine, Rasterizer};
use crate::config::OcrSettings;
use crate::error::LambertError;
use image::{DynamicImage, GenericImageView};

/// Resolution used to check that page 1 renders at all.
const VALIDATION_DPI: u32 = 72;

/// Per-page text for scanned PDFs: rasterize, crop to the left margin
/// holding the coordinate label, then OCR.
pub struct OcrTextSource<'a> {
    rasterizer: &'a dyn Rasterizer,
    engine: &'a dyn OcrEngine,
    settings: OcrSettings,
}

impl<'a> OcrTextSource<'a> {
    pub fn new(
        rasterizer: &'a dyn Rasterizer,
        engine: &'a dyn OcrEngine,
        settings: OcrSettings,
    ) -> Self {
        OcrTextSource {
            rasterizer,
            engine,
            settings,
        }
    }

    pub fn settings(&self) -> &OcrSettings {
        &self.settings
    }

    /// Check the bytes form a readable PDF by rendering its first page.
    ///
    /// The page count stays unknown; only page 1 is looked at.
    pub fn validate_document(&self, pdf_bytes: &[u8]) -> Result<(), LambertError> {
        if pdf_bytes.is_empty() {
            return Err(LambertError::LoadFailed("file is empty".into()));
        }
        match self.rasterizer.render(pdf_bytes, 1, VALIDATION_DPI) {
            Ok(Some(_)) => Ok(()),
            Ok(None) => Err(LambertError::LoadFailed("document has no pages".into())),
            Err(e @ LambertError::ToolNotFound { .. }) => Err(e),
            Err(e) => Err(LambertError::LoadFailed(e.to_string())),
        }
    }

    /// OCR text of a 1-based page, flattened to a single line.
    ///
    /// `Ok(None)` means the document has no such page.
    pub fn page_text(
        &self,
        pdf_bytes: &[u8],
        page_number: usize,
    ) -> Result<Option<String>, LambertError> {
        let Some(image) = self
            .rasterizer
            .render(pdf_bytes, page_number, self.settings.dpi)?
        else {
            return Ok(None);
        };

        let cropped = crop_left(&image, self.settings.crop_fraction);
        log::debug!(
            "page {}: OCR on {}x{} crop of {}x{} render",
            page_number,
            cropped.width(),
            cropped.height(),
            image.width(),
            image.height()
        );

        let raw = self
            .engine
            .recognize(&cropped, &self.settings.language, self.settings.layout)?;
        Ok(Some(collapse_lines(&raw)))
    }
}

/// Keep the left `fraction` of the image width, at least one pixel wide.
pub fn crop_left(image: &DynamicImage, fraction: f32) -> DynamicImage {
    let (width, height) = image.dimensions();
    let fraction = fraction.clamp(0.0, 1.0);
    let keep = ((width as f32 * fraction).round() as u32).clamp(1u32.min(width), width);
    image.crop_imm(0, 0, keep, height)
}

/// Join OCR lines with single spaces so a label and its numbers can match
/// across the line breaks the engine introduced.
pub fn collapse_lines(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crop_left_keeps_35_percent() {
        let image = DynamicImage::new_rgb8(1000, 400);
        let cropped = crop_left(&image, 0.35);
        assert_eq!(cropped.dimensions(), (350, 400));
    }

    #[test]
    fn test_crop_full_width() {
        let image = DynamicImage::new_luma8(640, 480);
        assert_eq!(crop_left(&image, 1.0).dimensions(), (640, 480));
    }

    #[test]
    fn test_crop_never_empty() {
        let image = DynamicImage::new_luma8(2, 2);
        assert_eq!(crop_left(&image, 0.01).width(), 1);
    }

    #[test]
    fn test_collapse_lines() {
        assert_eq!(
            collapse_lines("Lambert 2 etendu:\n601234,56 m,\r\n\n2412345,67  L2E\n"),
            "Lambert 2 etendu: 601234,56 m, 2412345,67 L2E"
        );
        assert_eq!(collapse_lines("\n\n"), "");
    }
}
