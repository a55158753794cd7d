//! Contents (СОДЕРЖАНИЕ) checks: every body heading must be listed in
//! the same order, and declared page numbers must strictly increase.
//!
//! The alignment walks both sequences with explicit index pointers so
//! missing, extra and reordered entries are reported individually, one
//! entry per offending heading.

use shared_types::{CheckEntry, DocumentModel, RuleConfig, SectionTag, Severity};

use crate::patterns::normalize_heading;

const SECTION: SectionTag = SectionTag::Contents;

pub fn check_contents(model: &DocumentModel, _config: &RuleConfig) -> Vec<CheckEntry> {
    let mut checks = Vec::new();

    if model.contents.is_empty() {
        checks.push(CheckEntry::fail(
            SECTION,
            "contents_present",
            Severity::Error,
            "СОДЕРЖАНИЕ section not found or empty",
        ));
        return checks;
    }
    checks.push(CheckEntry::pass(
        SECTION,
        "contents_present",
        "СОДЕРЖАНИЕ section found",
    ));

    align_with_body(model, &mut checks);
    check_pages_increasing(model, &mut checks);

    checks
}

fn headings_match(toc: &str, body: &str) -> bool {
    let toc = normalize_heading(toc);
    let body = normalize_heading(body);
    toc == body || toc.contains(&body) || body.contains(&toc)
}

fn align_with_body(model: &DocumentModel, checks: &mut Vec<CheckEntry>) {
    let toc = &model.contents;
    let mut j = 0;

    for section in &model.body_sections {
        match toc[j..]
            .iter()
            .position(|entry| headings_match(&entry.heading, &section.heading))
        {
            Some(offset) => {
                let matched = j + offset;
                // Entries skipped over appear earlier in the contents
                // than their body position, or match nothing at all.
                for skipped in &toc[j..matched] {
                    checks.push(CheckEntry::fail(
                        SECTION,
                        "entry_order",
                        Severity::Warning,
                        format!(
                            "Contents entry '{}' is out of order or matches no body heading",
                            skipped.heading
                        ),
                    ));
                }
                checks.push(CheckEntry::pass(
                    SECTION,
                    "entry_listed",
                    format!("Heading '{}' listed in contents", section.heading),
                ));
                j = matched + 1;
            }
            None => checks.push(CheckEntry::fail(
                SECTION,
                "entry_missing",
                Severity::Error,
                format!("Body heading '{}' missing from contents", section.heading),
            )),
        }
    }

    for leftover in &toc[j..] {
        checks.push(CheckEntry::fail(
            SECTION,
            "entry_order",
            Severity::Warning,
            format!(
                "Contents entry '{}' matches no body heading",
                leftover.heading
            ),
        ));
    }
}

fn check_pages_increasing(model: &DocumentModel, checks: &mut Vec<CheckEntry>) {
    let mut violations = 0;
    // Entries without a declared page do not reset the comparison; the
    // last declared page carries across them.
    let mut last: Option<(&str, u32)> = None;
    for entry in &model.contents {
        let Some(page) = entry.page else { continue };
        if let Some((prev_heading, prev_page)) = last {
            if page <= prev_page {
                violations += 1;
                checks.push(CheckEntry::fail(
                    SECTION,
                    "pages_increasing",
                    Severity::Error,
                    format!(
                        "Declared page numbers not increasing: '{prev_heading}' (p.{prev_page}) is followed by '{}' (p.{page})",
                        entry.heading
                    ),
                ));
            }
        }
        last = Some((&entry.heading, page));
    }
    if violations == 0 {
        checks.push(CheckEntry::pass(
            SECTION,
            "pages_increasing",
            "Declared page numbers strictly increase",
        ));
    }
}
