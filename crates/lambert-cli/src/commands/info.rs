use lambert_core::extraction::pdftotext::PdftotextProvider;
use std::path::PathBuf;

pub fn run(pdf_file: PathBuf) -> Result<(), lambert_core::error::LambertError> {
    PdftotextProvider::ensure_available()?;
    let pdf_bytes = std::fs::read(&pdf_file)?;
    log::debug!("read {} byte(s) from {}", pdf_bytes.len(), pdf_file.display());
    let provider = PdftotextProvider::new();
    let pages = lambert_core::page_count(&pdf_bytes, &provider)?;

    println!("{}: {} page(s)", pdf_file.display(), pages);
    Ok(())
}
