//! Document model types.

mod document;
mod paragraph;

pub use document::Document;
pub use paragraph::{Paragraph, TextRun};
