//! DOCX parser implementation.

use crate::container::OoxmlContainer;
use crate::detect::detect_format_from_bytes;
use crate::error::{Error, Result};
use crate::model::{Document, Paragraph, TextRun};
use quick_xml::events::{BytesStart, Event};
use std::path::Path;

/// Parser for DOCX (Word) documents.
pub struct DocxParser {
    container: OoxmlContainer,
}

impl DocxParser {
    /// Open a DOCX file for parsing.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        Self::from_bytes(data)
    }

    /// Create a parser from bytes.
    ///
    /// Anything that is not a Word document (legacy `.doc`, spreadsheets,
    /// arbitrary files) is rejected before the archive is read.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        detect_format_from_bytes(&data)?.require_docx()?;
        let container = OoxmlContainer::from_bytes(data)?;
        Ok(Self { container })
    }

    /// Parse the document and return a Document model.
    pub fn parse(&mut self) -> Result<Document> {
        let part = self.container.main_document_part()?;
        let xml = self.container.read_xml(&part)?;
        let doc = parse_document_xml(&xml)?;

        tracing::debug!(part = %part, paragraphs = doc.len(), "parsed main document part");
        Ok(doc)
    }

}

/// Where an element sits relative to the paragraphs we read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Document,
    Body,
    Paragraph,
    Hyperlink,
    Run,
    Text,
    /// Anything else, including tables, content controls and text boxes.
    /// Nothing below it is read.
    Other,
}

impl Scope {
    fn child(parent: Option<Scope>, local_name: &[u8]) -> Scope {
        match (parent, local_name) {
            (None, b"document") => Scope::Document,
            (Some(Scope::Document), b"body") => Scope::Body,
            (Some(Scope::Body), b"p") => Scope::Paragraph,
            (Some(Scope::Paragraph), b"hyperlink") => Scope::Hyperlink,
            (Some(Scope::Paragraph), b"r") | (Some(Scope::Hyperlink), b"r") => Scope::Run,
            (Some(Scope::Run), b"t") => Scope::Text,
            _ => Scope::Other,
        }
    }
}

/// Text contributed by a non-`w:t` run child.
fn run_child_text(local_name: &[u8], e: &BytesStart) -> Option<&'static str> {
    match local_name {
        b"tab" | b"ptab" => Some("\t"),
        b"cr" => Some("\n"),
        b"noBreakHyphen" => Some("-"),
        b"br" => {
            let break_type = e
                .attributes()
                .flatten()
                .find(|attr| attr.key.local_name().as_ref() == b"type")
                .map(|attr| attr.value.into_owned());
            match break_type.as_deref() {
                Some(b"page") | Some(b"column") => None,
                _ => Some("\n"),
            }
        }
        _ => None,
    }
}

/// Accumulates paragraphs while walking the event stream.
#[derive(Default)]
struct BodyReader {
    stack: Vec<Scope>,
    doc: Document,
    paragraph: Option<Paragraph>,
    run: Option<String>,
    saw_body: bool,
}

impl BodyReader {
    fn open(&mut self, e: &BytesStart) -> Scope {
        let local = e.local_name();
        let parent = self.stack.last().copied();
        let scope = Scope::child(parent, local.as_ref());

        match scope {
            Scope::Body => self.saw_body = true,
            Scope::Paragraph => self.paragraph = Some(Paragraph::new()),
            Scope::Run => self.run = Some(String::new()),
            _ => {}
        }

        if parent == Some(Scope::Run) {
            if let (Some(text), Some(run)) = (run_child_text(local.as_ref(), e), &mut self.run) {
                run.push_str(text);
            }
        }

        scope
    }

    fn close(&mut self, scope: Scope) {
        match scope {
            Scope::Run => {
                if let (Some(text), Some(para)) = (self.run.take(), &mut self.paragraph) {
                    if !text.is_empty() {
                        para.add_run(TextRun { text });
                    }
                }
            }
            Scope::Paragraph => {
                if let Some(para) = self.paragraph.take() {
                    self.doc.add_paragraph(para);
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if self.stack.last() == Some(&Scope::Text) {
            if let Some(run) = &mut self.run {
                run.push_str(text);
            }
        }
    }
}

/// Parse the WordprocessingML of a main document part.
///
/// Only paragraphs that are direct children of `w:body` are returned; text
/// inside tables, content controls and text boxes is not part of the body
/// paragraph sequence.
pub fn parse_document_xml(xml: &str) -> Result<Document> {
    let mut reader = quick_xml::Reader::from_str(xml);
    let mut body = BodyReader::default();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let scope = body.open(e);
                body.stack.push(scope);
            }
            Ok(Event::Empty(ref e)) => {
                let scope = body.open(e);
                body.close(scope);
            }
            Ok(Event::End(_)) => {
                let scope = body
                    .stack
                    .pop()
                    .ok_or_else(|| Error::XmlParse("unexpected closing tag".to_string()))?;
                body.close(scope);
            }
            Ok(Event::Text(ref e)) => {
                let text = e.unescape()?;
                body.text(&text);
            }
            Ok(Event::CData(ref e)) => {
                body.text(&String::from_utf8_lossy(e));
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlParse(format!(
                    "{} at byte {}",
                    e,
                    reader.error_position()
                )))
            }
            _ => {}
        }
        buf.clear();
    }

    if !body.stack.is_empty() {
        return Err(Error::XmlParse("document XML ends inside an open element".to_string()));
    }
    if !body.saw_body {
        return Err(Error::InvalidData("main document part has no w:body".to_string()));
    }

    Ok(body.doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrap(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
            body
        )
    }

    fn texts(body: &str) -> Vec<String> {
        parse_document_xml(&wrap(body))
            .unwrap()
            .paragraph_texts()
            .collect()
    }

    #[test]
    fn test_paragraph_sequence() {
        let result = texts(
            r#"<w:p/>
<w:p><w:r><w:t>Hello</w:t></w:r></w:p>
<w:p><w:r><w:br/></w:r></w:p>
<w:p><w:r><w:t>World</w:t></w:r></w:p>"#,
        );
        assert_eq!(result, ["", "Hello", "\n", "World"]);
    }

    #[test]
    fn test_whitespace_preserved() {
        let result = texts(
            r#"<w:p><w:r><w:t xml:space="preserve">Jehan </w:t></w:r><w:r><w:t xml:space="preserve"> de Luxembourg </w:t></w:r></w:p>"#,
        );
        assert_eq!(result, ["Jehan  de Luxembourg "]);
    }

    #[test]
    fn test_run_special_characters() {
        let result = texts(
            r#"<w:p><w:r><w:t>a</w:t><w:tab/><w:t>b</w:t><w:br/><w:t>c</w:t><w:cr/><w:t>d</w:t><w:noBreakHyphen/><w:t>e</w:t><w:br w:type="page"/></w:r></w:p>"#,
        );
        assert_eq!(result, ["a\tb\nc\nd-e"]);

        let result = texts(
            r#"<w:p><w:r><w:t>a</w:t><w:ptab/><w:t>b</w:t><w:br w:type="column"/><w:t>c</w:t><w:br w:type="textWrapping"/></w:r></w:p>"#,
        );
        assert_eq!(result, ["a\tbc\n"]);
    }

    #[test]
    fn test_hyperlink_runs_included() {
        let result = texts(
            r#"<w:p><w:r><w:t xml:space="preserve">See </w:t></w:r><w:hyperlink r:id="rId4" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><w:r><w:t>the archive</w:t></w:r></w:hyperlink></w:p>"#,
        );
        assert_eq!(result, ["See the archive"]);
    }

    #[test]
    fn test_table_paragraphs_skipped() {
        let result = texts(
            r#"<w:p><w:r><w:t>Before</w:t></w:r></w:p>
<w:tbl><w:tr><w:tc><w:p><w:r><w:t>Cell</w:t></w:r></w:p></w:tc></w:tr></w:tbl>
<w:p><w:r><w:t>After</w:t></w:r></w:p>"#,
        );
        assert_eq!(result, ["Before", "After"]);
    }

    #[test]
    fn test_field_codes_and_text_boxes_skipped() {
        let result = texts(
            r#"<w:p>
<w:r><w:instrText xml:space="preserve"> PAGE </w:instrText></w:r>
<w:r><w:t>Body</w:t></w:r>
<w:r><w:drawing><w:txbxContent><w:p><w:r><w:t>Boxed</w:t></w:r></w:p></w:txbxContent></w:drawing></w:r>
</w:p>"#,
        );
        assert_eq!(result, ["Body"]);
    }

    #[test]
    fn test_entities_unescaped() {
        let result = texts(r#"<w:p><w:r><w:t>Fish &amp; chips &lt;1453&gt;</w:t></w:r></w:p>"#);
        assert_eq!(result, ["Fish & chips <1453>"]);
    }

    #[test]
    fn test_paragraph_properties_ignored() {
        let doc = parse_document_xml(&wrap(
            r#"<w:p><w:pPr><w:pStyle w:val="Heading1"/><w:rPr><w:b/></w:rPr></w:pPr><w:r><w:t>Chapitre</w:t></w:r></w:p>"#,
        ))
        .unwrap();
        assert_eq!(doc.paragraphs[0].runs.len(), 1);
        assert_eq!(doc.paragraphs[0].text(), "Chapitre");
    }

    #[test]
    fn test_malformed_xml() {
        let result = parse_document_xml(&wrap("<w:p><w:r><w:t>open</w:r></w:p>"));
        assert!(matches!(result, Err(Error::XmlParse(_))));
    }

    #[test]
    fn test_missing_body() {
        let result = parse_document_xml(r#"<w:document xmlns:w="urn:w"/>"#);
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_from_bytes_rejects_non_docx() {
        let result = DocxParser::from_bytes(b"just some text".to_vec());
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }
}
