//! doctext CLI - transcription text extraction
//!
//! Reads `Transcription.docx` from the given directory and writes its
//! non-empty paragraphs to `../outputs/results.txt`.

mod term;

use clap::Parser;
use colored::*;
use doctext::Error;
use std::path::PathBuf;
use term::{create_spinner, init_tracing};

/// Extract the paragraphs of a Word transcription to plain text
#[derive(Parser)]
#[command(
    name = "doctext",
    version,
    about = "Extract the paragraphs of a Word transcription to plain text",
    long_about = "doctext - Word transcription text extraction.\n\n\
                  Reads <PATH>/Transcription.docx and writes its non-empty paragraphs,\n\
                  one per line, to <PATH>/../outputs/results.txt."
)]
struct Cli {
    /// Directory containing Transcription.docx
    path: Option<PathBuf>,
}

fn main() {
    init_tracing("warn");
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let Some(path) = cli.path else {
        println!("{}", Error::MissingArgument);
        return Ok(());
    };

    let pb = create_spinner("Extracting transcription...");
    let result = doctext::extract_dir(&path);
    pb.finish_and_clear();

    match result {
        Ok(report) => {
            println!(
                "{} Extracted {} of {} paragraphs to {}",
                "✓".green().bold(),
                report.line_count,
                report.paragraph_count,
                report.output_path.display()
            );
            Ok(())
        }
        Err(e @ Error::InvalidPath(_)) => {
            println!("{}", e);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
