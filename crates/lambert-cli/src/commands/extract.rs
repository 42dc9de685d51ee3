use lambert_core::config::{self, ExtractionConfig, PageErrorPolicy};
use lambert_core::error::LambertError;
use lambert_core::extraction::ocr::OcrTextSource;
use lambert_core::extraction::pdftoppm::PdftoppmRasterizer;
use lambert_core::extraction::pdftotext::PdftotextProvider;
use lambert_core::extraction::tesseract::TesseractEngine;
use lambert_core::pages::PageRequest;
use lambert_core::pipeline::Progress;
use lambert_core::report::ExtractionRun;
use std::path::PathBuf;

use crate::output;

pub struct ExtractArgs {
    pub input_file: PathBuf,
    pub ocr: bool,
    pub start: usize,
    pub end: Option<usize>,
    pub out: Option<PathBuf>,
    pub output_format: String,
    pub config: Option<PathBuf>,
    pub lang: Option<String>,
    pub dpi: Option<u32>,
    pub skip_errors: bool,
}

pub fn run(args: ExtractArgs) -> Result<(), LambertError> {
    let config = effective_config(&args)?;
    if args.ocr {
        PdftoppmRasterizer::ensure_available()?;
        TesseractEngine::ensure_available()?;
    } else {
        PdftotextProvider::ensure_available()?;
    }

    let pdf_bytes = std::fs::read(&args.input_file)?;
    log::debug!(
        "read {} byte(s) from {}, {} pipeline",
        pdf_bytes.len(),
        args.input_file.display(),
        if args.ocr { "ocr" } else { "digital" }
    );

    let mut on_progress = |p: Progress| output::text::progress(&p);

    let run = if args.ocr {
        let rasterizer = PdftoppmRasterizer::new();
        let engine = TesseractEngine::new();
        let end = args
            .end
            .unwrap_or_else(|| config.ocr.default_end(args.start));
        let source = OcrTextSource::new(&rasterizer, &engine, config.ocr);
        lambert_core::extract_ocr(
            &pdf_bytes,
            &source,
            PageRequest::new(args.start, end),
            &mut on_progress,
        )?
    } else {
        let provider = PdftotextProvider::new();
        // The resolver clamps to the real page count.
        let end = args.end.unwrap_or(usize::MAX);
        lambert_core::extract_digital(
            &pdf_bytes,
            &provider,
            PageRequest::new(args.start, end),
            &mut on_progress,
        )?
    };
    output::text::finish_progress();

    match args.output_format.as_str() {
        "json" => output::json::print(&run)?,
        _ => output::text::print_log(&run),
    }

    write_coordinates(&run, args.out)
}

/// Config file values, then explicit flags on top.
fn effective_config(args: &ExtractArgs) -> Result<ExtractionConfig, LambertError> {
    let mut config = match &args.config {
        Some(path) => config::load_config(path)?,
        None => ExtractionConfig::default(),
    };

    if let Some(ref lang) = args.lang {
        config.ocr.language = lang.clone();
    }
    if let Some(dpi) = args.dpi {
        config.ocr.dpi = dpi;
    }
    if args.skip_errors {
        config.ocr.on_page_error = PageErrorPolicy::Skip;
    }

    config::validate_config(&config)?;
    Ok(config)
}

fn write_coordinates(run: &ExtractionRun, out: Option<PathBuf>) -> Result<(), LambertError> {
    let Some(download) = run.download() else {
        eprintln!(
            "warning: no coordinates matching the expected format were found \
             in the selected pages"
        );
        return Ok(());
    };

    let path = out.unwrap_or_else(|| PathBuf::from(download.file_name));
    std::fs::write(&path, &download.content)?;
    eprintln!(
        "{} coordinate pair(s) written to {}",
        run.pairs.len(),
        path.display()
    );
    Ok(())
}
