//! Mandatory-section presence: introduction, conclusion, reference list
//! and whatever else the configuration names. Absence is always an
//! error.

use shared_types::{CheckEntry, DocumentModel, RuleConfig, SectionTag, Severity};

use crate::patterns::normalize_heading;

const SECTION: SectionTag = SectionTag::Structure;

pub fn check_structure(model: &DocumentModel, config: &RuleConfig) -> Vec<CheckEntry> {
    let mut checks = Vec::new();

    let headings: Vec<String> = model
        .body_sections
        .iter()
        .map(|s| normalize_heading(&s.heading))
        .collect();

    for mandatory in &config.mandatory_headings {
        let wanted = normalize_heading(mandatory);
        if headings.iter().any(|h| h.contains(&wanted)) {
            checks.push(CheckEntry::pass(
                SECTION,
                "mandatory_heading",
                format!("Mandatory section '{mandatory}' present"),
            ));
        } else {
            checks.push(CheckEntry::fail(
                SECTION,
                "mandatory_heading",
                Severity::Error,
                format!("Mandatory section '{mandatory}' missing"),
            ));
        }
    }

    checks
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::BodySection;

    fn model_with_headings(headings: &[&str]) -> DocumentModel {
        DocumentModel {
            body_sections: headings
                .iter()
                .map(|h| BodySection {
                    heading: h.to_string(),
                    level: 1,
                    paragraph_count: 1,
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_all_mandatory_present() {
        let model = model_with_headings(&[
            "ВВЕДЕНИЕ",
            "1 Обзор",
            "ЗАКЛЮЧЕНИЕ",
            "СПИСОК ИСПОЛЬЗОВАННЫХ ИСТОЧНИКОВ",
        ]);
        let checks = check_structure(&model, &RuleConfig::default());
        assert_eq!(checks.len(), 3);
        assert!(checks.iter().all(|c| c.passed));
    }

    #[test]
    fn test_missing_conclusion_is_error() {
        let model = model_with_headings(&["ВВЕДЕНИЕ", "СПИСОК ИСПОЛЬЗОВАННЫХ ИСТОЧНИКОВ"]);
        let checks = check_structure(&model, &RuleConfig::default());
        let failure = checks.iter().find(|c| !c.passed).unwrap();
        assert_eq!(failure.severity, Severity::Error);
        assert!(failure.message.contains("ЗАКЛЮЧЕНИЕ"));
    }

    #[test]
    fn test_matching_is_case_insensitive_substring() {
        let model = model_with_headings(&["Введение в предметную область"]);
        let config = RuleConfig {
            mandatory_headings: vec!["ВВЕДЕНИЕ".to_string()],
            ..Default::default()
        };
        let checks = check_structure(&model, &config);
        assert!(checks[0].passed);
    }

    #[test]
    fn test_one_entry_per_mandatory_heading() {
        let model = model_with_headings(&[]);
        let checks = check_structure(&model, &RuleConfig::default());
        assert_eq!(checks.len(), RuleConfig::default().mandatory_headings.len());
        assert!(checks.iter().all(|c| !c.passed));
    }
}
