//! find-occurrences - approximate search over an extracted transcription
//!
//! Loads a JSON list of search strings and reports how often each one
//! appears, within its edit-distance tolerance, in the extracted text.

mod term;

use clap::Parser;
use colored::*;
use doctext::search::{find_occurrences, load_search_strings};
use std::fs;
use std::path::PathBuf;
use term::{create_spinner, init_tracing};

/// Seek approximate occurrences of known strings in a text file
#[derive(Parser)]
#[command(name = "find-occurrences", version)]
struct Cli {
    /// Text file to search
    #[arg(short, long, default_value = "outputs/results.txt")]
    file: PathBuf,

    /// JSON file with the strings to search for
    #[arg(short, long, default_value = "assets/toFind.json")]
    strings_file: PathBuf,

    /// Trace every scanned line and match on stderr
    #[arg(short, long)]
    debug: bool,

    /// List the matching lines under each string
    #[arg(short, long)]
    print_occurrences: bool,

    /// Print the report as JSON
    #[arg(long, conflicts_with = "print_occurrences")]
    json: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(if cli.debug { "doctext=trace" } else { "warn" });

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let content = fs::read_to_string(&cli.file)
        .map_err(|e| format!("cannot read {}: {}", cli.file.display(), e))?;
    let strings = load_search_strings(&cli.strings_file)
        .map_err(|e| format!("{}: {}", cli.strings_file.display(), e))?;

    let pb = create_spinner(&format!(
        "Searching {} lines for {} strings...",
        content.lines().count(),
        strings.len()
    ));
    let report = find_occurrences(&content, &strings);
    pb.finish_and_clear();

    if cli.json {
        println!("{}", report.to_json()?);
    } else if cli.print_occurrences {
        print!("{}", report.detailed());
    } else {
        print!("{}", report);
    }

    Ok(())
}
