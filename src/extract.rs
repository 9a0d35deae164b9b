//! Transcription extraction: Word paragraphs to a flat text file.
//!
//! The pipeline reads `Transcription.docx` from a working directory, drops
//! paragraphs whose text is empty or a lone line break, and writes the rest,
//! newline-joined, to `../outputs/results.txt` relative to that directory.

use crate::docx::DocxParser;
use crate::error::{Error, Result};
use crate::model::Document;
use std::fs;
use std::path::{Path, PathBuf};

/// Default name of the source document inside the working directory.
pub const DEFAULT_SOURCE_NAME: &str = "Transcription.docx";

/// Default output directory, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "../outputs";

/// Default output file name inside the output directory.
pub const DEFAULT_OUTPUT_NAME: &str = "results.txt";

/// Where the extractor reads from and writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Source document file name, relative to the working directory
    pub source_name: PathBuf,

    /// Output directory, relative to the working directory
    pub output_dir: PathBuf,

    /// Output file name inside `output_dir`
    pub output_name: PathBuf,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            source_name: PathBuf::from(DEFAULT_SOURCE_NAME),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            output_name: PathBuf::from(DEFAULT_OUTPUT_NAME),
        }
    }
}

impl ExtractOptions {
    /// Create options with the default file layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the source document name.
    pub fn with_source_name(mut self, name: impl Into<PathBuf>) -> Self {
        self.source_name = name.into();
        self
    }

    /// Set the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the output file name.
    pub fn with_output_name(mut self, name: impl Into<PathBuf>) -> Self {
        self.output_name = name.into();
        self
    }

    /// Source document path for a working directory.
    pub fn source_path(&self, workdir: &Path) -> PathBuf {
        workdir.join(&self.source_name)
    }

    /// Output directory path for a working directory.
    pub fn output_dir_path(&self, workdir: &Path) -> PathBuf {
        workdir.join(&self.output_dir)
    }

    /// Output file path for a working directory.
    pub fn output_path(&self, workdir: &Path) -> PathBuf {
        self.output_dir_path(workdir).join(&self.output_name)
    }
}

/// Summary of a completed extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractReport {
    /// File that was written
    pub output_path: PathBuf,
    /// Paragraphs found in the document
    pub paragraph_count: usize,
    /// Lines written after filtering
    pub line_count: usize,
}

/// Whether a paragraph text carries content worth keeping.
fn is_content(text: &str) -> bool {
    !text.is_empty() && text != "\n"
}

/// Paragraph texts in document order, without empty and line-break-only paragraphs.
pub fn extract_lines(doc: &Document) -> Vec<String> {
    doc.paragraph_texts().filter(|text| is_content(text)).collect()
}

/// Join lines with `'\n'`; no trailing newline is added.
pub fn join_lines(lines: &[String]) -> String {
    lines.join("\n")
}

/// Runs the extraction pipeline for a working directory.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    options: ExtractOptions,
}

impl Extractor {
    /// Create an extractor with the given options.
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }

    /// Extract the source document of `workdir` into the output file.
    ///
    /// Fails with [`Error::InvalidPath`] before touching the filesystem when
    /// `workdir` does not exist. The document is fully read before the output
    /// directory is created, so an unreadable document leaves no output
    /// behind.
    pub fn run(&self, workdir: impl AsRef<Path>) -> Result<ExtractReport> {
        let workdir = workdir.as_ref();
        if !workdir.exists() {
            return Err(Error::InvalidPath(workdir.to_path_buf()));
        }

        let source = self.options.source_path(workdir);
        tracing::debug!(source = %source.display(), "reading transcription");
        let doc = DocxParser::open(&source)?.parse()?;

        let lines = extract_lines(&doc);
        let content = join_lines(&lines);

        let output_dir = self.options.output_dir_path(workdir);
        fs::create_dir_all(&output_dir)?;

        let output_path = self.options.output_path(workdir);
        fs::write(&output_path, content)?;

        tracing::info!(
            output = %output_path.display(),
            paragraphs = doc.len(),
            lines = lines.len(),
            "wrote extracted text"
        );

        Ok(ExtractReport {
            output_path,
            paragraph_count: doc.len(),
            line_count: lines.len(),
        })
    }
}

/// Extract `workdir/Transcription.docx` into `workdir/../outputs/results.txt`.
///
/// # Example
///
/// ```no_run
/// let report = doctext::extract_dir("assets")?;
/// println!("{} lines written to {}", report.line_count, report.output_path.display());
/// # Ok::<(), doctext::Error>(())
/// ```
pub fn extract_dir(workdir: impl AsRef<Path>) -> Result<ExtractReport> {
    Extractor::default().run(workdir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_lines_filters_empty_and_breaks() {
        let doc = Document::from_texts(["", "Hello", "\n", "World"]);
        let lines = extract_lines(&doc);
        assert_eq!(lines, ["Hello", "World"]);
        assert_eq!(join_lines(&lines), "Hello\nWorld");
    }

    #[test]
    fn test_extract_lines_keeps_whitespace_and_multi_breaks() {
        let doc = Document::from_texts([" ", "\n\n", "\t", "a\n"]);
        assert_eq!(extract_lines(&doc), [" ", "\n\n", "\t", "a\n"]);
    }

    #[test]
    fn test_extract_lines_preserves_order() {
        let doc = Document::from_texts(["third", "", "first", "second"]);
        assert_eq!(extract_lines(&doc), ["third", "first", "second"]);
    }

    #[test]
    fn test_join_lines_edge_cases() {
        assert_eq!(join_lines(&[]), "");
        assert_eq!(join_lines(&["only".to_string()]), "only");
    }

    #[test]
    fn test_default_layout() {
        let options = ExtractOptions::new();
        let workdir = Path::new("project/assets");
        assert_eq!(
            options.source_path(workdir),
            Path::new("project/assets/Transcription.docx")
        );
        assert_eq!(
            options.output_path(workdir),
            Path::new("project/assets/../outputs/results.txt")
        );
    }

    #[test]
    fn test_options_builder() {
        let options = ExtractOptions::new()
            .with_source_name("Notes.docx")
            .with_output_dir("out")
            .with_output_name("notes.txt");
        assert_eq!(options.output_path(Path::new("w")), Path::new("w/out/notes.txt"));
        assert_eq!(options.source_path(Path::new("w")), Path::new("w/Notes.docx"));
    }

    #[test]
    fn test_run_rejects_missing_workdir() {
        let result = extract_dir("/definitely/not/a/real/doctext/dir");
        assert!(matches!(result, Err(Error::InvalidPath(_))));
    }
}
