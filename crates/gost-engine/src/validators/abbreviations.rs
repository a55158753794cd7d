//! Abbreviation list (ПЕРЕЧЕНЬ СОКРАЩЕНИЙ И ОБОЗНАЧЕНИЙ) checks.
//!
//! Shape only: every entry needs both the abbreviation and its
//! expansion. Absence of the whole list is an error only when body
//! headings appear to use abbreviations; otherwise the configured
//! absence policy applies.

use shared_types::{AbsencePolicy, CheckEntry, DocumentModel, RuleConfig, SectionTag, Severity};

use crate::patterns::contains_abbreviation_token;

const SECTION: SectionTag = SectionTag::Abbreviations;

pub fn check_abbreviations(model: &DocumentModel, config: &RuleConfig) -> Vec<CheckEntry> {
    let mut checks = Vec::new();

    if model.abbreviations.is_empty() {
        check_absence(model, config, &mut checks);
        return checks;
    }

    checks.push(CheckEntry::pass(
        SECTION,
        "list_present",
        format!("Abbreviation list found ({} entries)", model.abbreviations.len()),
    ));

    let mut defective = 0;
    for (index, entry) in model.abbreviations.iter().enumerate() {
        if entry.abbreviation.trim().is_empty() || entry.expansion.trim().is_empty() {
            defective += 1;
            let label = if entry.abbreviation.trim().is_empty() {
                format!("entry {}", index + 1)
            } else {
                format!("'{}'", entry.abbreviation)
            };
            checks.push(CheckEntry::fail(
                SECTION,
                "entry_shape",
                Severity::Error,
                format!("Abbreviation list {label} lacks an abbreviation or its expansion"),
            ));
        }
    }
    if defective == 0 {
        checks.push(CheckEntry::pass(
            SECTION,
            "entry_shape",
            "All entries carry both abbreviation and expansion",
        ));
    }

    checks
}

fn check_absence(model: &DocumentModel, config: &RuleConfig, checks: &mut Vec<CheckEntry>) {
    let referenced = model
        .body_sections
        .iter()
        .any(|section| contains_abbreviation_token(&section.heading));

    if referenced {
        checks.push(CheckEntry::fail(
            SECTION,
            "list_present",
            Severity::Error,
            "Body headings use abbreviations but the abbreviation list is absent",
        ));
        return;
    }

    match config.missing_abbreviation_list {
        AbsencePolicy::Warn => checks.push(CheckEntry::fail(
            SECTION,
            "list_present",
            Severity::Warning,
            "Abbreviation list absent; add one if the report uses abbreviations",
        )),
        AbsencePolicy::Skip => checks.push(CheckEntry::pass(
            SECTION,
            "list_present",
            "Abbreviation list absent; no abbreviation usage detected",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{AbbreviationEntry, BodySection};

    fn entry(abbreviation: &str, expansion: &str) -> AbbreviationEntry {
        AbbreviationEntry {
            abbreviation: abbreviation.to_string(),
            expansion: expansion.to_string(),
        }
    }

    #[test]
    fn test_well_shaped_list_passes() {
        let model = DocumentModel {
            abbreviations: vec![
                entry("НИР", "научно-исследовательская работа"),
                entry("УДК", "универсальная десятичная классификация"),
            ],
            ..Default::default()
        };
        let checks = check_abbreviations(&model, &RuleConfig::default());
        assert!(checks.iter().all(|c| c.passed), "failures: {:?}", checks);
    }

    #[test]
    fn test_missing_expansion_is_error_per_entry() {
        let model = DocumentModel {
            abbreviations: vec![entry("НИР", ""), entry("ПО", ""), entry("ЭВМ", "машина")],
            ..Default::default()
        };
        let checks = check_abbreviations(&model, &RuleConfig::default());
        let errors = checks
            .iter()
            .filter(|c| c.name == "entry_shape" && !c.passed)
            .count();
        assert_eq!(errors, 2);
    }

    #[test]
    fn test_absent_list_with_referencing_headings_is_error() {
        let model = DocumentModel {
            body_sections: vec![BodySection {
                heading: "2 Использование СУБД в проекте".to_string(),
                level: 1,
                paragraph_count: 3,
            }],
            ..Default::default()
        };
        let checks = check_abbreviations(&model, &RuleConfig::default());
        assert_eq!(checks.len(), 1);
        assert_eq!(checks[0].severity, Severity::Error);
        assert!(!checks[0].passed);
    }

    #[test]
    fn test_absent_list_policy_warn_vs_skip() {
        let model = DocumentModel {
            body_sections: vec![BodySection {
                heading: "ЗАКЛЮЧЕНИЕ".to_string(),
                level: 1,
                paragraph_count: 1,
            }],
            ..Default::default()
        };

        let checks = check_abbreviations(&model, &RuleConfig::default());
        assert!(checks.iter().any(|c| c.severity == Severity::Warning && !c.passed));

        let skip = RuleConfig {
            missing_abbreviation_list: AbsencePolicy::Skip,
            ..Default::default()
        };
        let checks = check_abbreviations(&model, &skip);
        assert!(checks.iter().all(|c| c.passed));
    }
}
