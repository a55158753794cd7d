//! In-memory model of an extracted report document.
//!
//! Built once by the extraction adapter and never mutated afterwards.
//! Every field is populated (possibly empty) after extraction; validators
//! are responsible for flagging absence, the model never hides it behind
//! an error.

use serde::{Deserialize, Serialize};

use crate::config::Margins;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentModel {
    pub filename: String,
    pub title_page: TitlePage,
    pub abstract_page: AbstractPage,
    /// Entries of СОДЕРЖАНИЕ, in document order.
    pub contents: Vec<TocEntry>,
    /// Entries of ТЕРМИНЫ И ОПРЕДЕЛЕНИЯ, in document order.
    pub terms: Vec<TermEntry>,
    /// Entries of ПЕРЕЧЕНЬ СОКРАЩЕНИЙ И ОБОЗНАЧЕНИЙ, in document order.
    pub abbreviations: Vec<AbbreviationEntry>,
    /// Lines of СПИСОК ИСПОЛНИТЕЛЕЙ, in document order.
    pub executors: Vec<String>,
    /// Body headings in document order. Positional checks (TOC alignment)
    /// rely on this ordering.
    pub body_sections: Vec<BodySection>,
    pub formatting: FormattingMetadata,
}

/// Front-matter fields of the title page. A field the extractor could not
/// locate is empty/`None`, never an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TitlePage {
    /// Organization block from the top of the page, joined with newlines.
    pub organization: String,
    /// Report type line(s), e.g. "ОТЧЕТ О НАУЧНО-ИССЛЕДОВАТЕЛЬСКОЙ РАБОТЕ".
    pub document_type: String,
    /// Approval stamps found on the page (СОГЛАСОВАНО, УТВЕРЖДАЮ, ...).
    pub signatures: Vec<Signature>,
    /// UDC line as written; empty string when absent, possibly malformed.
    pub udc_index: String,
    pub registration_number: Option<String>,
    pub supervisor: Option<String>,
    pub author: Option<String>,
    pub place: Option<String>,
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signature {
    /// Stamp role, e.g. "УТВЕРЖДАЮ".
    pub role: String,
    /// Name/initials block next to the stamp, empty when not recognized.
    pub name: String,
    pub present: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AbstractPage {
    pub body: String,
    /// Character count of `body`, derived at extraction time.
    pub char_count: usize,
    /// Keywords in the order they appear after "Ключевые слова:".
    pub keywords: Vec<String>,
    /// Page count declared in the abstract lead sentence.
    pub page_count: Option<u32>,
    /// Cited-source count declared in the abstract lead sentence.
    pub source_count: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TocEntry {
    pub heading: String,
    /// Declared page number; `None` when the line carried none.
    pub page: Option<u32>,
    pub level: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TermEntry {
    pub term: String,
    pub definition: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbbreviationEntry {
    pub abbreviation: String,
    pub expansion: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodySection {
    pub heading: String,
    pub level: u8,
    pub paragraph_count: usize,
}

/// Paragraph classes the formatting checks distinguish. Mismatches are
/// reported per class, not per paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParagraphClass {
    Title,
    Heading,
    Body,
    Caption,
}

impl ParagraphClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParagraphClass::Title => "title",
            ParagraphClass::Heading => "heading",
            ParagraphClass::Body => "body",
            ParagraphClass::Caption => "caption",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontSample {
    pub class: ParagraphClass,
    pub font_name: Option<String>,
    pub font_size: Option<f32>,
}

/// Sampled formatting facts. One `FontSample` per observed
/// (class, font, size) combination, not per paragraph.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormattingMetadata {
    pub samples: Vec<FontSample>,
    pub line_spacing: Option<f32>,
    pub margins: Option<Margins>,
}
