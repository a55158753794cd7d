//! Term list (ТЕРМИНЫ И ОПРЕДЕЛЕНИЯ) checks: alphabetical ordering
//! verified pairwise, duplicates flagged per term.

use std::collections::BTreeMap;

use shared_types::{CheckEntry, DocumentModel, RuleConfig, SectionTag, Severity};

const SECTION: SectionTag = SectionTag::Terms;

pub fn check_terms(model: &DocumentModel, _config: &RuleConfig) -> Vec<CheckEntry> {
    let mut checks = Vec::new();

    if model.terms.is_empty() {
        // The term list is a conditional structural element; its absence
        // is not a defect by itself.
        checks.push(CheckEntry::pass(
            SECTION,
            "terms_present",
            "Term list absent or empty; element is optional",
        ));
        return checks;
    }
    checks.push(CheckEntry::pass(
        SECTION,
        "terms_present",
        format!("Term list found ({} entries)", model.terms.len()),
    ));

    check_alphabetical(model, &mut checks);
    check_duplicates(model, &mut checks);

    checks
}

fn sort_key(term: &str) -> String {
    term.trim().to_lowercase()
}

fn check_alphabetical(model: &DocumentModel, checks: &mut Vec<CheckEntry>) {
    let mut out_of_order = 0;
    for pair in model.terms.windows(2) {
        if sort_key(&pair[0].term) > sort_key(&pair[1].term) {
            out_of_order += 1;
            checks.push(CheckEntry::fail(
                SECTION,
                "alphabetical_order",
                Severity::Warning,
                format!(
                    "Terms out of alphabetical order: '{}' appears before '{}'",
                    pair[0].term, pair[1].term
                ),
            ));
        }
    }
    if out_of_order == 0 {
        checks.push(CheckEntry::pass(
            SECTION,
            "alphabetical_order",
            "Terms are in alphabetical order",
        ));
    }
}

fn check_duplicates(model: &DocumentModel, checks: &mut Vec<CheckEntry>) {
    let mut occurrences: BTreeMap<String, usize> = BTreeMap::new();
    for entry in &model.terms {
        *occurrences.entry(sort_key(&entry.term)).or_insert(0) += 1;
    }

    let mut duplicates = 0;
    for (term, count) in occurrences {
        if count > 1 {
            duplicates += 1;
            checks.push(CheckEntry::fail(
                SECTION,
                "duplicate_term",
                Severity::Error,
                format!("Duplicate term '{term}' defined {count} times"),
            ));
        }
    }
    if duplicates == 0 {
        checks.push(CheckEntry::pass(
            SECTION,
            "duplicate_term",
            "No duplicate terms",
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::TermEntry;

    fn model_with_terms(terms: &[&str]) -> DocumentModel {
        DocumentModel {
            terms: terms
                .iter()
                .map(|t| TermEntry {
                    term: t.to_string(),
                    definition: "определение".to_string(),
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_out_of_order_pair_yields_one_warning() {
        let checks = check_terms(&model_with_terms(&["Zeta", "Alpha"]), &RuleConfig::default());
        let warnings: Vec<_> = checks
            .iter()
            .filter(|c| c.name == "alphabetical_order" && !c.passed)
            .collect();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].severity, Severity::Warning);
        assert!(warnings[0].message.contains("Zeta"));
        assert!(warnings[0].message.contains("Alpha"));
    }

    #[test]
    fn test_sorted_terms_pass() {
        let checks = check_terms(
            &model_with_terms(&["Валидация", "Документ", "Стандарт"]),
            &RuleConfig::default(),
        );
        assert!(checks.iter().all(|c| c.passed), "failures: {:?}", checks);
    }

    #[test]
    fn test_each_out_of_order_pair_reported() {
        let checks = check_terms(
            &model_with_terms(&["Гамма", "Бета", "Альфа"]),
            &RuleConfig::default(),
        );
        let warnings = checks
            .iter()
            .filter(|c| c.name == "alphabetical_order" && !c.passed)
            .count();
        assert_eq!(warnings, 2);
    }

    #[test]
    fn test_duplicate_term_is_one_error_per_term() {
        let checks = check_terms(
            &model_with_terms(&["Альфа", "Альфа", "альфа", "Бета"]),
            &RuleConfig::default(),
        );
        let errors: Vec<_> = checks
            .iter()
            .filter(|c| c.name == "duplicate_term" && !c.passed)
            .collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].severity, Severity::Error);
        assert!(errors[0].message.contains("3 times"));
    }

    #[test]
    fn test_empty_list_contributes_single_pass_entry() {
        let checks = check_terms(&DocumentModel::default(), &RuleConfig::default());
        assert_eq!(checks.len(), 1);
        assert!(checks[0].passed);
    }
}
