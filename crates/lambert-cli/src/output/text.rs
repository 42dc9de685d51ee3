use lambert_core::model::PageOutcome;
use lambert_core::pipeline::Progress;
use lambert_core::report::{ExtractionRun, RunStatus, StopReason};
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

static PROGRESS_SHOWN: AtomicBool = AtomicBool::new(false);

/// Redraw the single progress line on stderr.
pub fn progress(p: &Progress) {
    PROGRESS_SHOWN.store(true, Ordering::Relaxed);
    let mut stderr = std::io::stderr();
    let _ = write!(
        stderr,
        "\r  page {:<5} {:>3.0}%",
        p.page,
        p.fraction() * 100.0
    );
    let _ = stderr.flush();
}

pub fn finish_progress() {
    if PROGRESS_SHOWN.swap(false, Ordering::Relaxed) {
        eprintln!();
    }
}

pub fn print_log(run: &ExtractionRun) {
    println!("=== Processing log ({}) ===\n", run.pipeline);
    for entry in &run.logs {
        let marker = match entry.outcome {
            PageOutcome::Found => "+",
            PageOutcome::NotFound => "-",
            PageOutcome::Error => "!",
        };
        println!("  {} {}", marker, entry);
    }
    if run.logs.is_empty() {
        println!("  (no pages in the selected range)");
    }
    println!();

    match run.stop {
        StopReason::Completed => {}
        StopReason::DocumentExhausted { page } => {
            println!("  Document ends before page {page}; stopped there.\n")
        }
        StopReason::Aborted { page } => println!(
            "  Stopped after the error on page {page}. \
             Use --skip-errors to continue past failing pages.\n"
        ),
    }

    match run.status() {
        RunStatus::Found(n) => {
            println!("{} coordinate pair(s) extracted:\n", n);
            for pair in &run.pairs {
                println!("  {}", pair);
            }
            println!();
        }
        RunStatus::Empty => println!("No coordinates extracted.\n"),
    }
}
