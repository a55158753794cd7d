//! Extraction adapter: maps the raw paragraph stream onto the document
//! model.
//!
//! Mapping is best-effort and deterministic. A structural element whose
//! expected pattern is not found yields an empty field; only an input
//! that is not a well-formed document at all aborts the run. Flagging
//! absence is the validators' job, not ours.

use thiserror::Error;

use shared_docx::{read_docx, DocxError, RawDocument, RawParagraph};
use shared_types::{
    AbbreviationEntry, AbstractPage, BodySection, DocumentModel, FontSample, FormattingMetadata,
    ParagraphClass, Signature, TermEntry, TitlePage, TocEntry,
};

use crate::patterns::{
    extract_initials, extract_year, is_uppercase_text, match_section_keyword,
    numbered_heading_level, APPROVAL_STAMPS, KEYWORDS_ANCHOR, NUMBERED_HEADING_RE, PAGE_COUNT_RE,
    REPORT_TYPE_FIRST, REPORT_TYPE_SECOND, SOURCE_COUNT_RE, TOC_PAGE_RE, YEAR_RE,
};

/// The only error class that aborts a run before any validator executes.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error(transparent)]
    Container(#[from] DocxError),
    #[error("document contains no paragraphs")]
    EmptyDocument,
}

/// Title page heuristics look at this many leading paragraphs at most.
const TITLE_PAGE_SPAN: usize = 30;

/// Keywords that open a body section rather than a front-matter element.
const BODY_KEYWORDS: &[&str] = &[
    "ВВЕДЕНИЕ",
    "ЗАКЛЮЧЕНИЕ",
    "СПИСОК ИСПОЛЬЗОВАННЫХ ИСТОЧНИКОВ",
    "ПРИЛОЖЕНИЕ",
];

enum HeadingKind {
    Front(&'static str),
    Body { level: u8 },
}

fn classify_heading(paragraph: &RawParagraph) -> Option<HeadingKind> {
    if let Some(keyword) = match_section_keyword(&paragraph.text) {
        if BODY_KEYWORDS.contains(&keyword) {
            return Some(HeadingKind::Body { level: 1 });
        }
        return Some(HeadingKind::Front(keyword));
    }
    if let Some(level) = numbered_heading_level(&paragraph.text) {
        return Some(HeadingKind::Body { level });
    }
    if let Some(style) = &paragraph.style_id {
        let style = style.to_ascii_lowercase();
        if let Some(rest) = style.strip_prefix("heading") {
            let level = rest.trim().parse().unwrap_or(1);
            return Some(HeadingKind::Body { level });
        }
    }
    None
}

/// Read DOCX bytes and extract the document model in one step.
pub fn extract_docx(bytes: &[u8], filename: &str) -> Result<DocumentModel, ExtractionError> {
    let raw = read_docx(bytes)?;
    extract(&raw, filename)
}

/// Convert a raw paragraph stream into the document model.
pub fn extract(raw: &RawDocument, filename: &str) -> Result<DocumentModel, ExtractionError> {
    if raw.paragraphs.is_empty() {
        return Err(ExtractionError::EmptyDocument);
    }

    enum Cursor {
        Title,
        Front(usize),
        Body,
    }

    let mut title_paragraphs: Vec<&RawParagraph> = Vec::new();
    let mut front_sections: Vec<(&'static str, Vec<&RawParagraph>)> = Vec::new();
    let mut body_sections: Vec<BodySection> = Vec::new();
    let mut formatting = FormattingMetadata {
        samples: Vec::new(),
        line_spacing: None,
        margins: raw.margins,
    };
    let mut cursor = Cursor::Title;

    for paragraph in &raw.paragraphs {
        let heading = classify_heading(paragraph);
        let class = match (&heading, &cursor) {
            (Some(_), _) => ParagraphClass::Heading,
            (None, Cursor::Title) => ParagraphClass::Title,
            (None, _) if is_caption(&paragraph.text) => ParagraphClass::Caption,
            (None, _) => ParagraphClass::Body,
        };
        sample_formatting(&mut formatting, class, paragraph);

        match heading {
            Some(HeadingKind::Front(keyword)) => {
                front_sections.push((keyword, Vec::new()));
                cursor = Cursor::Front(front_sections.len() - 1);
            }
            Some(HeadingKind::Body { level }) => {
                body_sections.push(BodySection {
                    heading: paragraph.text.trim().to_string(),
                    level,
                    paragraph_count: 0,
                });
                cursor = Cursor::Body;
            }
            None => match cursor {
                Cursor::Title => {
                    if title_paragraphs.len() < TITLE_PAGE_SPAN {
                        title_paragraphs.push(paragraph);
                    }
                }
                Cursor::Front(index) => front_sections[index].1.push(paragraph),
                Cursor::Body => {
                    if let Some(section) = body_sections.last_mut() {
                        section.paragraph_count += 1;
                    }
                }
            },
        }
    }

    let section_texts = |keyword: &str| -> Vec<&str> {
        front_sections
            .iter()
            .find(|(kw, _)| *kw == keyword)
            .map(|(_, paragraphs)| paragraphs.iter().map(|p| p.text.trim()).collect())
            .unwrap_or_default()
    };

    let model = DocumentModel {
        filename: filename.to_string(),
        title_page: parse_title_page(&title_paragraphs),
        abstract_page: parse_abstract(&section_texts("РЕФЕРАТ")),
        contents: parse_contents(&section_texts("СОДЕРЖАНИЕ")),
        terms: parse_terms(&section_texts("ТЕРМИНЫ И ОПРЕДЕЛЕНИЯ")),
        abbreviations: parse_abbreviations(&section_texts("ПЕРЕЧЕНЬ СОКРАЩЕНИЙ И ОБОЗНАЧЕНИЙ")),
        executors: section_texts("СПИСОК ИСПОЛНИТЕЛЕЙ")
            .iter()
            .map(|line| line.to_string())
            .collect(),
        body_sections,
        formatting,
    };

    tracing::debug!(
        filename,
        toc_entries = model.contents.len(),
        body_sections = model.body_sections.len(),
        terms = model.terms.len(),
        abbreviations = model.abbreviations.len(),
        "extracted document model"
    );
    Ok(model)
}

fn is_caption(text: &str) -> bool {
    let trimmed = text.trim_start();
    trimmed.starts_with("Рисунок") || trimmed.starts_with("Таблица")
}

fn sample_formatting(
    formatting: &mut FormattingMetadata,
    class: ParagraphClass,
    paragraph: &RawParagraph,
) {
    if class == ParagraphClass::Body && formatting.line_spacing.is_none() {
        formatting.line_spacing = paragraph.line_spacing;
    }
    if paragraph.font_name.is_none() && paragraph.font_size.is_none() {
        return;
    }
    let already_sampled = formatting.samples.iter().any(|s| {
        s.class == class
            && s.font_name == paragraph.font_name
            && match (s.font_size, paragraph.font_size) {
                (Some(a), Some(b)) => (a - b).abs() < 0.01,
                (a, b) => a == b,
            }
    });
    if !already_sampled {
        formatting.samples.push(FontSample {
            class,
            font_name: paragraph.font_name.clone(),
            font_size: paragraph.font_size,
        });
    }
}

// Title page heuristics follow the layout the standard prescribes:
// organization block on top in capitals, УДК and registration numbers on
// the left, approval stamps, the report-type block, place and year at
// the bottom.
fn parse_title_page(paragraphs: &[&RawParagraph]) -> TitlePage {
    let texts: Vec<&str> = paragraphs.iter().map(|p| p.text.trim()).collect();
    let (place, year) = find_place_and_year(&texts);

    TitlePage {
        organization: find_organization_block(&texts).join("\n"),
        document_type: find_document_type(&texts).unwrap_or_default(),
        signatures: find_signatures(&texts),
        udc_index: texts
            .iter()
            .find(|t| t.to_uppercase().contains("УДК"))
            .map(|t| t.to_string())
            .unwrap_or_default(),
        registration_number: texts
            .iter()
            .find(|t| {
                let upper = t.to_uppercase();
                upper.contains("РЕГ") && (upper.contains("НИОКТР") || upper.contains("ИКРБС"))
            })
            .map(|t| t.to_string()),
        supervisor: texts
            .iter()
            .find(|t| t.to_lowercase().contains("руководител"))
            .map(|t| t.to_string()),
        author: texts
            .iter()
            .find(|t| t.to_lowercase().contains("исполнитель"))
            .map(|t| t.to_string()),
        place,
        year,
    }
}

/// Leading all-caps lines of the title page. Initial non-caps lines are
/// skipped (a ministry line may be set in mixed case); the block ends at
/// the first non-caps line after it started. Metadata and stamp lines do
/// not belong to the block.
fn find_organization_block(texts: &[&str]) -> Vec<String> {
    let mut block = Vec::new();
    let mut found_caps = false;

    for text in texts.iter().take(15) {
        if text.is_empty() {
            continue;
        }
        let upper = text.to_uppercase();
        let is_metadata = upper.contains("УДК")
            || upper.contains("РЕГ")
            || APPROVAL_STAMPS.iter().any(|s| upper.contains(s));
        if is_metadata {
            if found_caps {
                break;
            }
            continue;
        }
        if is_uppercase_text(text) {
            block.push(text.to_string());
            found_caps = true;
        } else if found_caps {
            break;
        }
    }
    block
}

fn find_document_type(texts: &[&str]) -> Option<String> {
    for (i, text) in texts.iter().enumerate() {
        let upper = text.to_uppercase();
        if !upper.contains(REPORT_TYPE_FIRST) {
            continue;
        }
        if upper.contains(REPORT_TYPE_SECOND) {
            return Some(text.to_string());
        }
        if let Some(next) = texts.get(i + 1) {
            if next.to_uppercase().contains(REPORT_TYPE_SECOND) {
                return Some(format!("{}\n{}", text, next));
            }
        }
    }
    None
}

/// Every known stamp is reported, found or not, so validators can check
/// required roles against one list.
fn find_signatures(texts: &[&str]) -> Vec<Signature> {
    APPROVAL_STAMPS
        .iter()
        .map(|stamp| {
            let position = texts.iter().position(|t| t.to_uppercase().contains(stamp));
            match position {
                Some(index) => {
                    // The signer line with initials sits within a few
                    // lines under the stamp.
                    let name = texts[index..texts.len().min(index + 5)]
                        .iter()
                        .find(|t| !extract_initials(t).is_empty())
                        .map(|t| t.to_string())
                        .unwrap_or_default();
                    Signature {
                        role: stamp.to_string(),
                        name,
                        present: true,
                    }
                }
                None => Signature {
                    role: stamp.to_string(),
                    name: String::new(),
                    present: false,
                },
            }
        })
        .collect()
}

/// Place and year from the bottom lines, e.g. "Москва 2025".
fn find_place_and_year(texts: &[&str]) -> (Option<String>, Option<i32>) {
    for text in texts.iter().rev().take(5) {
        if let Some(year) = extract_year(text) {
            let place = YEAR_RE.replace(text, "").trim_matches([' ', ',']).to_string();
            let place = if place.is_empty() { None } else { Some(place) };
            return (place, Some(year));
        }
    }
    (None, None)
}

fn parse_abstract(lines: &[&str]) -> AbstractPage {
    let keyword_line = lines.iter().position(|line| {
        line.to_uppercase()
            .trim_start()
            .starts_with(KEYWORDS_ANCHOR)
    });

    let keywords = keyword_line
        .map(|index| {
            let line = lines[index];
            let tail = line.split_once(':').map(|(_, t)| t).unwrap_or(line);
            tail.split(',')
                .map(|kw| kw.trim().trim_end_matches('.').trim().to_string())
                .filter(|kw| !kw.is_empty())
                .collect()
        })
        .unwrap_or_default();

    let body = lines
        .iter()
        .enumerate()
        .filter(|(i, _)| Some(*i) != keyword_line)
        .map(|(_, line)| *line)
        .collect::<Vec<_>>()
        .join("\n");

    fn capture_u32(re: &regex::Regex, text: &str) -> Option<u32> {
        re.captures(text)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse().ok())
    }
    let page_count = capture_u32(&PAGE_COUNT_RE, &body);
    let source_count = capture_u32(&SOURCE_COUNT_RE, &body);

    AbstractPage {
        char_count: body.chars().count(),
        page_count,
        source_count,
        keywords,
        body,
    }
}

fn parse_contents(lines: &[&str]) -> Vec<TocEntry> {
    lines
        .iter()
        .filter_map(|line| {
            let (heading, page) = match TOC_PAGE_RE.captures(line) {
                Some(captures) => {
                    let tail = captures.get(0).unwrap();
                    let page = captures.get(1).and_then(|m| m.as_str().parse().ok());
                    (line[..tail.start()].to_string(), page)
                }
                None => (line.to_string(), None),
            };
            let heading = heading.trim_matches(['.', '…', ' ', '\t']).to_string();
            if heading.is_empty() {
                return None;
            }
            let level = NUMBERED_HEADING_RE
                .captures(&heading)
                .and_then(|c| c.get(1))
                .map(|numbering| numbering.as_str().split('.').count() as u8)
                .unwrap_or(1);
            Some(TocEntry {
                heading,
                page,
                level,
            })
        })
        .collect()
}

/// Split an "entry — definition" line on the first dash or colon.
fn split_entry(line: &str) -> Option<(String, String)> {
    for separator in [" — ", " – ", " - ", ": ", ":"] {
        if let Some((left, right)) = line.split_once(separator) {
            let left = left.trim();
            if !left.is_empty() {
                return Some((left.to_string(), right.trim().to_string()));
            }
        }
    }
    None
}

fn parse_terms(lines: &[&str]) -> Vec<TermEntry> {
    // Lines without a separator are definition continuations; the term
    // list keeps only well-shaped entries.
    lines
        .iter()
        .filter_map(|line| split_entry(line))
        .map(|(term, definition)| TermEntry { term, definition })
        .collect()
}

fn parse_abbreviations(lines: &[&str]) -> Vec<AbbreviationEntry> {
    // Unlike terms, abbreviation entries are one line each; a line that
    // does not split is an entry with a missing expansion and the shape
    // check will flag it.
    lines
        .iter()
        .map(|line| match split_entry(line) {
            Some((abbreviation, expansion)) => AbbreviationEntry {
                abbreviation,
                expansion,
            },
            None => AbbreviationEntry {
                abbreviation: line.to_string(),
                expansion: String::new(),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_document() -> RawDocument {
        RawDocument::from_texts(&[
            "МИНИСТЕРСТВО НАУКИ И ВЫСШЕГО ОБРАЗОВАНИЯ РОССИЙСКОЙ ФЕДЕРАЦИИ",
            "ФЕДЕРАЛЬНОЕ ГОСУДАРСТВЕННОЕ БЮДЖЕТНОЕ УЧРЕЖДЕНИЕ",
            "УДК 004.056.5",
            "Рег. N НИОКТР 123456789",
            "УТВЕРЖДАЮ",
            "Директор института А.В. Иванов",
            "ОТЧЕТ",
            "О НАУЧНО-ИССЛЕДОВАТЕЛЬСКОЙ РАБОТЕ",
            "Руководитель НИР С.П. Петров",
            "Ответственный исполнитель Б.Г. Сидоров",
            "Москва 2025",
            "СПИСОК ИСПОЛНИТЕЛЕЙ",
            "Руководитель темы С.П. Петров",
            "Исполнитель Б.Г. Сидоров",
            "РЕФЕРАТ",
            "Отчет 45 с., 12 рис., 20 источников.",
            "Ключевые слова: валидация, документ, стандарт, отчет, структура.",
            "В отчете рассмотрены методы проверки структуры документов.",
            "СОДЕРЖАНИЕ",
            "ВВЕДЕНИЕ.......... 3",
            "1 Обзор методов.......... 5",
            "ЗАКЛЮЧЕНИЕ.......... 40",
            "ТЕРМИНЫ И ОПРЕДЕЛЕНИЯ",
            "Валидация — проверка соответствия требованиям.",
            "Документ — носитель информации.",
            "ПЕРЕЧЕНЬ СОКРАЩЕНИЙ И ОБОЗНАЧЕНИЙ",
            "НИР — научно-исследовательская работа",
            "УДК — универсальная десятичная классификация",
            "ВВЕДЕНИЕ",
            "Текст введения.",
            "1 Обзор методов",
            "Текст раздела.",
            "Еще текст раздела.",
            "ЗАКЛЮЧЕНИЕ",
            "Текст заключения.",
        ])
    }

    #[test]
    fn test_empty_document_is_fatal() {
        let raw = RawDocument::default();
        assert!(matches!(
            extract(&raw, "empty.docx"),
            Err(ExtractionError::EmptyDocument)
        ));
    }

    #[test]
    fn test_title_page_fields() {
        let model = extract(&sample_document(), "report.docx").unwrap();
        let title = &model.title_page;

        assert!(title.organization.starts_with("МИНИСТЕРСТВО"));
        assert_eq!(title.udc_index, "УДК 004.056.5");
        assert_eq!(
            title.registration_number.as_deref(),
            Some("Рег. N НИОКТР 123456789")
        );
        assert_eq!(title.document_type, "ОТЧЕТ\nО НАУЧНО-ИССЛЕДОВАТЕЛЬСКОЙ РАБОТЕ");
        assert_eq!(
            title.supervisor.as_deref(),
            Some("Руководитель НИР С.П. Петров")
        );
        assert_eq!(
            title.author.as_deref(),
            Some("Ответственный исполнитель Б.Г. Сидоров")
        );
        assert_eq!(title.place.as_deref(), Some("Москва"));
        assert_eq!(title.year, Some(2025));

        let approve = title
            .signatures
            .iter()
            .find(|s| s.role == "УТВЕРЖДАЮ")
            .unwrap();
        assert!(approve.present);
        assert!(approve.name.contains("А.В."));
        let agree = title
            .signatures
            .iter()
            .find(|s| s.role == "СОГЛАСОВАНО")
            .unwrap();
        assert!(!agree.present);
    }

    #[test]
    fn test_abstract_fields() {
        let model = extract(&sample_document(), "report.docx").unwrap();
        let abstract_page = &model.abstract_page;

        assert_eq!(abstract_page.keywords.len(), 5);
        assert_eq!(abstract_page.keywords[0], "валидация");
        assert_eq!(abstract_page.page_count, Some(45));
        assert_eq!(abstract_page.source_count, Some(20));
        assert!(!abstract_page.body.contains("Ключевые слова"));
        assert_eq!(abstract_page.char_count, abstract_page.body.chars().count());
    }

    #[test]
    fn test_contents_entries() {
        let model = extract(&sample_document(), "report.docx").unwrap();

        let headings: Vec<&str> = model.contents.iter().map(|e| e.heading.as_str()).collect();
        assert_eq!(headings, vec!["ВВЕДЕНИЕ", "1 Обзор методов", "ЗАКЛЮЧЕНИЕ"]);
        let pages: Vec<Option<u32>> = model.contents.iter().map(|e| e.page).collect();
        assert_eq!(pages, vec![Some(3), Some(5), Some(40)]);
    }

    #[test]
    fn test_terms_and_abbreviations() {
        let model = extract(&sample_document(), "report.docx").unwrap();

        assert_eq!(model.terms.len(), 2);
        assert_eq!(model.terms[0].term, "Валидация");
        assert_eq!(model.abbreviations.len(), 2);
        assert_eq!(model.abbreviations[0].abbreviation, "НИР");
        assert_eq!(
            model.abbreviations[0].expansion,
            "научно-исследовательская работа"
        );
    }

    #[test]
    fn test_executor_list_section() {
        let model = extract(&sample_document(), "report.docx").unwrap();

        assert_eq!(
            model.executors,
            vec!["Руководитель темы С.П. Петров", "Исполнитель Б.Г. Сидоров"]
        );
    }

    #[test]
    fn test_body_sections_in_order_with_counts() {
        let model = extract(&sample_document(), "report.docx").unwrap();

        let sections: Vec<(&str, usize)> = model
            .body_sections
            .iter()
            .map(|s| (s.heading.as_str(), s.paragraph_count))
            .collect();
        assert_eq!(
            sections,
            vec![
                ("ВВЕДЕНИЕ", 1),
                ("1 Обзор методов", 2),
                ("ЗАКЛЮЧЕНИЕ", 1),
            ]
        );
    }

    #[test]
    fn test_missing_elements_yield_empty_fields() {
        let raw = RawDocument::from_texts(&["Просто один абзац без структуры"]);
        let model = extract(&raw, "bare.docx").unwrap();

        assert!(model.title_page.organization.is_empty());
        assert!(model.title_page.udc_index.is_empty());
        assert!(model.abstract_page.keywords.is_empty());
        assert!(model.contents.is_empty());
        assert!(model.terms.is_empty());
        assert!(model.body_sections.is_empty());
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let raw = sample_document();
        let a = extract(&raw, "report.docx").unwrap();
        let b = extract(&raw, "report.docx").unwrap();
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}
