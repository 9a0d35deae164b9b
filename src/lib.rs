//! # doctext
//!
//! Extract paragraph text from a Word transcription and search it for
//! approximate occurrences of known names and phrases.
//!
//! ## Quick Start
//!
//! ```no_run
//! // assets/Transcription.docx -> outputs/results.txt
//! let report = doctext::extract_dir("assets")?;
//! println!("{} lines", report.line_count);
//!
//! // Paragraph texts of any .docx
//! let doc = doctext::parse_file("assets/Transcription.docx")?;
//! for line in doctext::extract_lines(&doc) {
//!     println!("{}", line);
//! }
//! # Ok::<(), doctext::Error>(())
//! ```
//!
//! ## Searching
//!
//! ```no_run
//! use doctext::search::{find_occurrences, load_search_strings};
//!
//! let strings = load_search_strings("assets/toFind.json")?;
//! let text = std::fs::read_to_string("outputs/results.txt")?;
//! print!("{}", find_occurrences(&text, &strings));
//! # Ok::<(), doctext::Error>(())
//! ```

pub mod container;
pub mod detect;
pub mod docx;
pub mod error;
pub mod extract;
pub mod model;
pub mod search;

// Re-exports
pub use container::{OoxmlContainer, Relationship, Relationships};
pub use detect::{detect_format_from_bytes, detect_format_from_path, FormatType};
pub use error::{Error, Result};
pub use extract::{extract_dir, extract_lines, join_lines, ExtractOptions, ExtractReport, Extractor};
pub use model::{Document, Paragraph, TextRun};
pub use search::{find_occurrences, OccurrenceReport, SearchString};

use std::path::Path;

/// Parse a Word document file and return its body paragraphs.
///
/// # Example
///
/// ```no_run
/// let doc = doctext::parse_file("Transcription.docx")?;
/// println!("Paragraphs: {}", doc.len());
/// # Ok::<(), doctext::Error>(())
/// ```
pub fn parse_file(path: impl AsRef<Path>) -> Result<Document> {
    docx::DocxParser::open(path)?.parse()
}

/// Parse a Word document from bytes.
pub fn parse_bytes(data: &[u8]) -> Result<Document> {
    docx::DocxParser::from_bytes(data.to_vec())?.parse()
}

/// Extract the filtered, newline-joined text of a Word document.
///
/// This is the content the extractor writes to `results.txt`.
pub fn extract_text(path: impl AsRef<Path>) -> Result<String> {
    let doc = parse_file(path)?;
    Ok(join_lines(&extract_lines(&doc)))
}
