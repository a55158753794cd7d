//! Shared DOCX handling utilities
//!
//! Reads the Open XML container and exposes a flat, finite paragraph
//! stream in document order. No interpretation happens here; mapping the
//! stream onto the document model is the engine's job.

pub mod reader;

pub use reader::{read_docx, Alignment, DocxError, RawDocument, RawParagraph};
