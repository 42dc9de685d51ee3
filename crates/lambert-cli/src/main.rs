mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "lambert",
    version,
    about = "Extract Lambert 2 coordinate pairs from PDF documents"
)]
struct Cli {
    /// Show per-page diagnostics (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the page count of a digitally produced PDF
    Info {
        /// Path to PDF file
        input_file: PathBuf,
    },
    /// Extract "X m, Y" coordinate pairs from a range of pages
    Extract {
        /// Path to PDF file
        input_file: PathBuf,

        /// Read scanned pages through OCR instead of the text layer
        #[arg(long)]
        ocr: bool,

        /// First page (1-based)
        #[arg(short, long, default_value_t = 1)]
        start: usize,

        /// Last page (1-based, inclusive). Defaults to the last page, or to
        /// the configured page estimate with --ocr
        #[arg(short, long)]
        end: Option<usize>,

        /// Coordinate file to write (default: coordonnees_lambert.txt or
        /// coordonnees_lambert_ocr.txt)
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        /// Output format: text (default) or json
        #[arg(short, long, default_value = "text")]
        output: String,

        /// JSON config file
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// OCR language (tesseract code, e.g. "fra")
        #[arg(long)]
        lang: Option<String>,

        /// OCR rasterization resolution
        #[arg(long)]
        dpi: Option<u32>,

        /// Keep going after a page fails to OCR instead of stopping
        #[arg(long)]
        skip_errors: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Info { input_file } => commands::info::run(input_file),
        Commands::Extract {
            input_file,
            ocr,
            start,
            end,
            out,
            output,
            config,
            lang,
            dpi,
            skip_errors,
        } => commands::extract::run(commands::extract::ExtractArgs {
            input_file,
            ocr,
            start,
            end,
            out,
            output_format: output,
            config,
            lang,
            dpi,
            skip_errors,
        }),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}
