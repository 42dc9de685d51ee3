use lambert_core::error::LambertError;
use lambert_core::report::ExtractionRun;

pub fn print(run: &ExtractionRun) -> Result<(), LambertError> {
    let json = serde_json::to_string_pretty(run)?;
    println!("{json}");
    Ok(())
}
