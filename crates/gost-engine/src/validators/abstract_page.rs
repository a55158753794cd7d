//! Abstract (РЕФЕРАТ) checks: presence, keyword list, length bounds and
//! declared volume metadata.
//!
//! Length below the configured minimum is a recommendation-level
//! finding; above the maximum it is an error.

use shared_types::{CheckEntry, DocumentModel, RuleConfig, SectionTag, Severity};

const SECTION: SectionTag = SectionTag::Abstract;

pub fn check_abstract(model: &DocumentModel, config: &RuleConfig) -> Vec<CheckEntry> {
    let mut checks = Vec::new();
    let abstract_page = &model.abstract_page;

    if abstract_page.body.is_empty() && abstract_page.keywords.is_empty() {
        checks.push(CheckEntry::fail(
            SECTION,
            "abstract_present",
            Severity::Error,
            "РЕФЕРАТ section not found",
        ));
        return checks;
    }
    checks.push(CheckEntry::pass(
        SECTION,
        "abstract_present",
        "РЕФЕРАТ section found",
    ));

    check_keywords(abstract_page, config, &mut checks);
    check_length(abstract_page, config, &mut checks);
    check_volume_metadata(abstract_page, &mut checks);

    checks
}

fn check_keywords(
    abstract_page: &shared_types::AbstractPage,
    config: &RuleConfig,
    checks: &mut Vec<CheckEntry>,
) {
    if abstract_page.keywords.is_empty() {
        checks.push(CheckEntry::fail(
            SECTION,
            "keywords_present",
            Severity::Error,
            "Keyword list (Ключевые слова) missing from the abstract",
        ));
        return;
    }
    checks.push(CheckEntry::pass(
        SECTION,
        "keywords_present",
        "Keyword list present",
    ));

    let count = abstract_page.keywords.len();
    if count < config.min_keywords || count > config.max_keywords {
        checks.push(CheckEntry::fail(
            SECTION,
            "keywords_count",
            Severity::Error,
            format!(
                "Keyword count {count} outside the required range {}..={}",
                config.min_keywords, config.max_keywords
            ),
        ));
    } else {
        checks.push(CheckEntry::pass(
            SECTION,
            "keywords_count",
            format!("Keyword count {count} within range"),
        ));
    }
}

fn check_length(
    abstract_page: &shared_types::AbstractPage,
    config: &RuleConfig,
    checks: &mut Vec<CheckEntry>,
) {
    let count = abstract_page.char_count;
    if count < config.min_abstract_chars {
        checks.push(CheckEntry::fail(
            SECTION,
            "length_minimum",
            Severity::Warning,
            format!(
                "Abstract is below recommended length: {count} characters, recommended at least {}",
                config.min_abstract_chars
            ),
        ));
    } else {
        checks.push(CheckEntry::pass(
            SECTION,
            "length_minimum",
            format!("Abstract length {count} meets the recommended minimum"),
        ));
    }

    if count > config.max_abstract_chars {
        checks.push(CheckEntry::fail(
            SECTION,
            "length_maximum",
            Severity::Error,
            format!(
                "Abstract exceeds maximum length: {count} characters, allowed at most {}",
                config.max_abstract_chars
            ),
        ));
    } else {
        checks.push(CheckEntry::pass(
            SECTION,
            "length_maximum",
            "Abstract within maximum length",
        ));
    }
}

fn check_volume_metadata(abstract_page: &shared_types::AbstractPage, checks: &mut Vec<CheckEntry>) {
    if abstract_page.page_count.is_some() {
        checks.push(CheckEntry::pass(
            SECTION,
            "page_count",
            "Page count declared in the abstract",
        ));
    } else {
        checks.push(CheckEntry::fail(
            SECTION,
            "page_count",
            Severity::Error,
            "Abstract must declare the report volume (page count, e.g. '45 с.')",
        ));
    }

    if abstract_page.source_count.is_some() {
        checks.push(CheckEntry::pass(
            SECTION,
            "source_count",
            "Source count declared in the abstract",
        ));
    } else {
        checks.push(CheckEntry::fail(
            SECTION,
            "source_count",
            Severity::Warning,
            "Abstract should declare the number of cited sources",
        ));
    }
}
