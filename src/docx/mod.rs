//! DOCX (Word) paragraph reader.

mod parser;

pub use parser::{parse_document_xml, DocxParser};
