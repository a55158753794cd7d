//! Keyword tables and text-matching helpers shared by the extraction
//! adapter and the validators.

use lazy_static::lazy_static;
use regex::Regex;

/// Structural-element headings named by GOST 7.32-2017.
pub const SECTION_KEYWORDS: &[&str] = &[
    "СПИСОК ИСПОЛНИТЕЛЕЙ",
    "РЕФЕРАТ",
    "СОДЕРЖАНИЕ",
    "ТЕРМИНЫ И ОПРЕДЕЛЕНИЯ",
    "ПЕРЕЧЕНЬ СОКРАЩЕНИЙ И ОБОЗНАЧЕНИЙ",
    "ВВЕДЕНИЕ",
    "ЗАКЛЮЧЕНИЕ",
    "СПИСОК ИСПОЛЬЗОВАННЫХ ИСТОЧНИКОВ",
    "ПРИЛОЖЕНИЕ",
];

/// Words expected somewhere in the organization block of the title page.
pub const ORGANIZATION_KEYWORDS: &[&str] = &[
    "МИНИСТЕРСТВО",
    "ФЕДЕРАЛЬНОЕ",
    "АГЕНТСТВО",
    "УНИВЕРСИТЕТ",
    "ИНСТИТУТ",
    "АКАДЕМИЯ",
];

/// Approval stamps the title page may carry.
pub const APPROVAL_STAMPS: &[&str] = &["СОГЛАСОВАНО", "УТВЕРЖДАЮ"];

/// The two lines of the report-type block.
pub const REPORT_TYPE_FIRST: &str = "ОТЧЕТ";
pub const REPORT_TYPE_SECOND: &str = "НАУЧНО-ИССЛЕДОВАТЕЛЬСКОЙ";

/// Lead-in of the keyword line of the abstract.
pub const KEYWORDS_ANCHOR: &str = "КЛЮЧЕВЫЕ СЛОВА";

lazy_static! {
    /// Initials as written on the title page, e.g. "А.В.".
    pub static ref INITIALS_RE: Regex = Regex::new(r"[А-ЯЁA-Z]\.\s?[А-ЯЁA-Z]\.").unwrap();
    /// Four-digit year of this century.
    pub static ref YEAR_RE: Regex = Regex::new(r"\b(20\d{2})\b").unwrap();
    /// Well-formed UDC line: the "УДК" marker followed by a
    /// digit/punctuation classification code.
    pub static ref UDC_RE: Regex = Regex::new(r"УДК\s+[0-9][0-9.:;/()+\*\-]*").unwrap();
    /// Numbered body heading: "1 НАЗВАНИЕ", "1.2 Название", "2. Обзор".
    pub static ref NUMBERED_HEADING_RE: Regex =
        Regex::new(r"^(\d+(?:\.\d+)*)\.?\s+[А-ЯЁA-Z]").unwrap();
    /// Chapter-style heading: "Глава 1".
    pub static ref CHAPTER_HEADING_RE: Regex = Regex::new(r"(?i)^глава\s+\d+").unwrap();
    /// Trailing declared page number of a contents line, with optional
    /// dot leaders or tabs before it.
    pub static ref TOC_PAGE_RE: Regex = Regex::new(r"[.\s…\t]{2,}(\d{1,4})\s*$").unwrap();
    /// Declared page count in the abstract lead sentence, e.g. "45 с.".
    pub static ref PAGE_COUNT_RE: Regex = Regex::new(r"(\d+)\s*с\.").unwrap();
    /// Declared source count in the abstract lead sentence.
    pub static ref SOURCE_COUNT_RE: Regex = Regex::new(r"(\d+)\s*источник").unwrap();
}

/// True when every letter of the text is uppercase. Digits, spaces and
/// punctuation are ignored; text without letters does not qualify.
pub fn is_uppercase_text(text: &str) -> bool {
    let mut has_letter = false;
    for c in text.chars().filter(|c| c.is_alphabetic()) {
        has_letter = true;
        if !c.is_uppercase() {
            return false;
        }
    }
    has_letter
}

/// Extract initials ("А.В.") occurrences in document order.
pub fn extract_initials(text: &str) -> Vec<String> {
    INITIALS_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// First year mentioned in the text.
pub fn extract_year(text: &str) -> Option<i32> {
    YEAR_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Uppercased text with runs of whitespace collapsed to single spaces.
/// Headings are compared in this form.
pub fn normalize_heading(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

/// Section keyword this paragraph is a heading of, if any. Contents
/// lines carrying a trailing page number are not headings even when
/// they start with a keyword.
pub fn match_section_keyword(text: &str) -> Option<&'static str> {
    if TOC_PAGE_RE.is_match(text) {
        return None;
    }
    let normalized = normalize_heading(text);
    SECTION_KEYWORDS.iter().copied().find(|kw| {
        normalized == *kw || normalized.starts_with(&format!("{kw} "))
    })
}

/// Nesting level of a numbered heading: "1" is level 1, "1.2.3" level 3.
pub fn numbered_heading_level(text: &str) -> Option<u8> {
    if TOC_PAGE_RE.is_match(text) {
        return None;
    }
    if CHAPTER_HEADING_RE.is_match(text.trim()) {
        return Some(1);
    }
    NUMBERED_HEADING_RE
        .captures(text.trim())
        .and_then(|c| c.get(1))
        .map(|numbering| numbering.as_str().split('.').count().min(u8::MAX as usize) as u8)
}

/// Heuristic for abbreviation usage: an all-caps token of 2..=8 letters
/// inside an otherwise mixed-case heading.
pub fn contains_abbreviation_token(text: &str) -> bool {
    if is_uppercase_text(text) {
        // A fully uppercase heading (ВВЕДЕНИЕ etc.) is normal style,
        // not abbreviation usage.
        return false;
    }
    text.split(|c: char| !c.is_alphanumeric()).any(|token| {
        let letters = token.chars().filter(|c| c.is_alphabetic()).count();
        letters >= 2 && token.chars().count() <= 8 && is_uppercase_text(token)
    })
}
