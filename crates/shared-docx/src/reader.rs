//! DOCX container reader.
//!
//! DOCX files are ZIP archives containing XML parts in Open XML format;
//! the main content lives in `word/document.xml`. The reader walks that
//! part with a streaming XML parser and produces one `RawParagraph` per
//! `<w:p>` element, preserving document order.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::{Cursor, Read};
use thiserror::Error;
use zip::ZipArchive;

use shared_types::Margins;

/// Errors from the container layer. All of them mean the input is not a
/// well-formed document, not that the document is non-compliant.
#[derive(Debug, Error)]
pub enum DocxError {
    #[error("failed to open DOCX archive: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error("missing required part: {0}")]
    MissingPart(&'static str),
    #[error("failed to read archive part: {0}")]
    Io(#[from] std::io::Error),
    #[error("XML parse error in word/document.xml: {0}")]
    Xml(#[from] quick_xml::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
}

/// One paragraph as written, with the formatting hints the standard
/// cares about. Run texts are folded into `text`.
#[derive(Debug, Clone, Default)]
pub struct RawParagraph {
    pub text: String,
    /// Style id from `<w:pStyle>`, e.g. "Heading1".
    pub style_id: Option<String>,
    pub alignment: Option<Alignment>,
    /// Font of the first run that declares one.
    pub font_name: Option<String>,
    /// Size in points of the first run that declares one.
    pub font_size: Option<f32>,
    /// Line spacing multiplier from `<w:spacing w:line=...>`.
    pub line_spacing: Option<f32>,
}

impl RawParagraph {
    /// Convenience constructor for building fixtures.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

/// The finite paragraph stream handed to the extraction adapter.
#[derive(Debug, Clone, Default)]
pub struct RawDocument {
    pub paragraphs: Vec<RawParagraph>,
    /// Page margins from the section properties, when declared.
    pub margins: Option<Margins>,
}

impl RawDocument {
    pub fn from_texts<S: AsRef<str>>(texts: &[S]) -> Self {
        Self {
            paragraphs: texts
                .iter()
                .map(|t| RawParagraph::text(t.as_ref()))
                .collect(),
            margins: None,
        }
    }
}

/// Twentieths of a point (the unit of `<w:pgMar>`) to millimetres.
fn twips_to_mm(twips: f32) -> f32 {
    twips / 20.0 * 25.4 / 72.0
}

/// Half-points (the unit of `<w:sz>`) to points.
fn half_points_to_points(half: f32) -> f32 {
    half / 2.0
}

/// Read a DOCX byte stream into a `RawDocument`.
pub fn read_docx(bytes: &[u8]) -> Result<RawDocument, DocxError> {
    let cursor = Cursor::new(bytes);
    let mut archive = ZipArchive::new(cursor)?;

    let xml_content = {
        let mut file = archive
            .by_name("word/document.xml")
            .map_err(|_| DocxError::MissingPart("word/document.xml"))?;
        let mut content = String::new();
        file.read_to_string(&mut content)?;
        content
    };

    let document = parse_document_xml(&xml_content)?;
    tracing::debug!(
        paragraphs = document.paragraphs.len(),
        has_margins = document.margins.is_some(),
        "read DOCX container"
    );
    Ok(document)
}

fn parse_document_xml(xml_content: &str) -> Result<RawDocument, DocxError> {
    let mut reader = Reader::from_str(xml_content);
    reader.trim_text(true);

    let mut document = RawDocument::default();
    let mut buf = Vec::new();

    let mut current = RawParagraph::default();
    let mut in_paragraph = false;
    let mut in_run = false;
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"p" => {
                    in_paragraph = true;
                    current = RawParagraph::default();
                }
                b"r" => in_run = true,
                b"t" => in_text = true,
                other => handle_property(other, e, &mut current, &mut document, in_paragraph, in_run),
            },
            Ok(Event::Empty(ref e)) => {
                let name = e.local_name();
                handle_property(name.as_ref(), e, &mut current, &mut document, in_paragraph, in_run);
                if name.as_ref() == b"br" && in_run {
                    current.text.push('\n');
                }
            }
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"p" => {
                    in_paragraph = false;
                    let para = std::mem::take(&mut current);
                    if !para.text.trim().is_empty() {
                        document.paragraphs.push(para);
                    }
                }
                b"r" => in_run = false,
                b"t" => in_text = false,
                _ => {}
            },
            Ok(Event::Text(e)) => {
                if in_text && in_run {
                    current.text.push_str(&e.unescape().unwrap_or_default());
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(DocxError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(document)
}

fn handle_property(
    name: &[u8],
    e: &BytesStart,
    current: &mut RawParagraph,
    document: &mut RawDocument,
    in_paragraph: bool,
    in_run: bool,
) {
    match name {
        b"pStyle" if in_paragraph => {
            current.style_id = get_attribute(e, "val");
        }
        b"jc" if in_paragraph => {
            if let Some(val) = get_attribute(e, "val") {
                current.alignment = Some(match val.as_str() {
                    "center" => Alignment::Center,
                    "right" => Alignment::Right,
                    "both" => Alignment::Justify,
                    _ => Alignment::Left,
                });
            }
        }
        b"rFonts" if in_run => {
            if current.font_name.is_none() {
                current.font_name = get_attribute(e, "ascii").or_else(|| get_attribute(e, "hAnsi"));
            }
        }
        b"sz" if in_run => {
            if current.font_size.is_none() {
                if let Some(half) = get_attribute(e, "val").and_then(|v| v.parse::<f32>().ok()) {
                    current.font_size = Some(half_points_to_points(half));
                }
            }
        }
        b"spacing" if in_paragraph => {
            // <w:spacing w:line="360" w:lineRule="auto"/> in 240ths of a line
            if let Some(line) = get_attribute(e, "line").and_then(|v| v.parse::<f32>().ok()) {
                current.line_spacing = Some(line / 240.0);
            }
        }
        b"pgMar" => {
            let margin = |attr: &str| {
                get_attribute(e, attr)
                    .and_then(|v| v.parse::<f32>().ok())
                    .map(twips_to_mm)
            };
            if let (Some(top), Some(bottom), Some(left), Some(right)) = (
                margin("top"),
                margin("bottom"),
                margin("left"),
                margin("right"),
            ) {
                document.margins = Some(Margins {
                    top_mm: top,
                    bottom_mm: bottom,
                    left_mm: left,
                    right_mm: right,
                });
            }
        }
        _ => {}
    }
}

/// Helper to get an attribute value from an XML element, ignoring the
/// namespace prefix.
fn get_attribute(e: &BytesStart, name: &str) -> Option<String> {
    for attr in e.attributes().flatten() {
        let key = attr.key.local_name();
        if key.as_ref() == name.as_bytes() {
            return Some(String::from_utf8_lossy(&attr.value).to_string());
        }
    }
    None
}
