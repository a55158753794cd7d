pub mod config;
pub mod document;
pub mod report;

pub use config::{AbsencePolicy, Margins, RuleConfig};
pub use document::{
    AbbreviationEntry, AbstractPage, BodySection, DocumentModel, FontSample, FormattingMetadata,
    ParagraphClass, Signature, TermEntry, TitlePage, TocEntry,
};
pub use report::{CheckEntry, RunStatus, SectionTag, Severity, ValidationReport};
