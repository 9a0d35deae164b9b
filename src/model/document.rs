//! Document model structures.

use super::Paragraph;
use serde::{Deserialize, Serialize};

/// A parsed Word document: its body paragraphs in reading order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Body paragraphs
    #[serde(default)]
    pub paragraphs: Vec<Paragraph>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document with one single-run paragraph per text.
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            paragraphs: texts.into_iter().map(Paragraph::with_text).collect(),
        }
    }

    /// Add a paragraph to the document.
    pub fn add_paragraph(&mut self, para: Paragraph) {
        self.paragraphs.push(para);
    }

    /// Number of paragraphs.
    pub fn len(&self) -> usize {
        self.paragraphs.len()
    }

    /// Check if the document has no paragraphs.
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    /// Iterate over paragraph texts in document order.
    pub fn paragraph_texts(&self) -> impl Iterator<Item = String> + '_ {
        self.paragraphs.iter().map(Paragraph::text)
    }

    /// Convert to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TextRun;

    #[test]
    fn test_document_creation() {
        let mut doc = Document::new();
        assert!(doc.is_empty());

        doc.add_paragraph(Paragraph {
            runs: vec![TextRun::plain("Hello, "), TextRun::plain("World!")],
            ..Default::default()
        });

        assert!(!doc.is_empty());
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.paragraph_texts().collect::<Vec<_>>(), ["Hello, World!"]);
    }

    #[test]
    fn test_from_texts_keeps_order() {
        let doc = Document::from_texts(["", "Hello", "\n", "World"]);
        let texts: Vec<String> = doc.paragraph_texts().collect();
        assert_eq!(texts, ["", "Hello", "\n", "World"]);
    }

    #[test]
    fn test_document_json() {
        let doc = Document::from_texts(["Prologue"]);
        let json = doc.to_json().unwrap();
        assert!(json.contains("paragraphs"));
        assert!(json.contains("Prologue"));
    }
}
