//! Title page checks: organization block, approval stamps, UDC index,
//! registration number, report type, supervisor and executor lines,
//! place and year.

use chrono::Datelike;

use shared_types::{CheckEntry, DocumentModel, RuleConfig, SectionTag, Severity};

use crate::patterns::{extract_initials, is_uppercase_text, ORGANIZATION_KEYWORDS, UDC_RE};

const SECTION: SectionTag = SectionTag::TitlePage;

pub fn check_title_page(model: &DocumentModel, config: &RuleConfig) -> Vec<CheckEntry> {
    let mut checks = Vec::new();
    let title = &model.title_page;

    check_organization(title, &mut checks);
    check_signatures(title, config, &mut checks);
    check_udc(title, config, &mut checks);
    check_registration_number(title, config, &mut checks);
    check_document_type(title, &mut checks);
    check_supervisor(title, &mut checks);
    check_executors(model, &mut checks);
    check_place_and_year(title, &mut checks);

    checks
}

fn check_organization(title: &shared_types::TitlePage, checks: &mut Vec<CheckEntry>) {
    if title.organization.is_empty() {
        checks.push(CheckEntry::fail(
            SECTION,
            "organization_present",
            Severity::Error,
            "Organization name not found at the top of the title page",
        ));
        return;
    }
    checks.push(CheckEntry::pass(
        SECTION,
        "organization_present",
        "Organization block found",
    ));

    for line in title.organization.lines() {
        if !is_uppercase_text(line) {
            checks.push(CheckEntry::fail(
                SECTION,
                "organization_uppercase",
                Severity::Error,
                format!("Organization name must be set in capitals: '{line}'"),
            ));
        }
    }

    let upper = title.organization.to_uppercase();
    if ORGANIZATION_KEYWORDS.iter().any(|kw| upper.contains(kw)) {
        checks.push(CheckEntry::pass(
            SECTION,
            "organization_keywords",
            "Organization block matches the expected pattern",
        ));
    } else {
        checks.push(CheckEntry::fail(
            SECTION,
            "organization_keywords",
            Severity::Warning,
            "Organization block carries none of the expected words (министерство, федеральное, университет, ...)",
        ));
    }
}

fn check_signatures(
    title: &shared_types::TitlePage,
    config: &RuleConfig,
    checks: &mut Vec<CheckEntry>,
) {
    for role in &config.required_signature_roles {
        let role_upper = role.to_uppercase();
        let found = title
            .signatures
            .iter()
            .find(|s| s.present && s.role.to_uppercase() == role_upper);
        match found {
            Some(signature) => {
                checks.push(CheckEntry::pass(
                    SECTION,
                    "signature_role",
                    format!("Approval stamp '{role}' present"),
                ));
                if extract_initials(&signature.name).is_empty() {
                    checks.push(CheckEntry::fail(
                        SECTION,
                        "signature_initials",
                        Severity::Warning,
                        format!("No signer initials found next to the '{role}' stamp (expected format: А.В.)"),
                    ));
                }
            }
            None => checks.push(CheckEntry::fail(
                SECTION,
                "signature_role",
                Severity::Error,
                format!("Approval stamp '{role}' missing from the title page"),
            )),
        }
    }
}

fn check_udc(title: &shared_types::TitlePage, config: &RuleConfig, checks: &mut Vec<CheckEntry>) {
    if title.udc_index.is_empty() {
        checks.push(CheckEntry::fail(
            SECTION,
            "udc_present",
            Severity::Error,
            "UDC index missing from the title page",
        ));
    } else if UDC_RE.is_match(&title.udc_index) {
        checks.push(CheckEntry::pass(SECTION, "udc_present", "UDC index present"));
    } else {
        checks.push(CheckEntry::fail(
            SECTION,
            "udc_format",
            config.udc_malformed_severity,
            format!(
                "UDC index present but malformed: '{}' (expected digits and classification punctuation)",
                title.udc_index
            ),
        ));
    }
}

fn check_registration_number(
    title: &shared_types::TitlePage,
    config: &RuleConfig,
    checks: &mut Vec<CheckEntry>,
) {
    match (&title.registration_number, config.require_registration_number) {
        (Some(_), _) => checks.push(CheckEntry::pass(
            SECTION,
            "registration_number",
            "Registration number present",
        )),
        (None, true) => checks.push(CheckEntry::fail(
            SECTION,
            "registration_number",
            Severity::Error,
            "Registration number (НИОКТР) required but missing",
        )),
        (None, false) => checks.push(CheckEntry::fail(
            SECTION,
            "registration_number",
            Severity::Warning,
            "Registration number (НИОКТР) is recommended on the title page",
        )),
    }
}

fn check_document_type(title: &shared_types::TitlePage, checks: &mut Vec<CheckEntry>) {
    if title.document_type.is_empty() {
        checks.push(CheckEntry::fail(
            SECTION,
            "document_type",
            Severity::Error,
            "Report type block (ОТЧЕТ О НАУЧНО-ИССЛЕДОВАТЕЛЬСКОЙ РАБОТЕ) not found",
        ));
        return;
    }
    if title.document_type.lines().all(is_uppercase_text) {
        checks.push(CheckEntry::pass(
            SECTION,
            "document_type",
            "Report type block present",
        ));
    } else {
        checks.push(CheckEntry::fail(
            SECTION,
            "document_type",
            Severity::Error,
            "Report type block must be set in capitals",
        ));
    }
}

fn check_supervisor(title: &shared_types::TitlePage, checks: &mut Vec<CheckEntry>) {
    match &title.supervisor {
        None => checks.push(CheckEntry::fail(
            SECTION,
            "supervisor",
            Severity::Warning,
            "Supervisor line (Руководитель) is recommended on the title page",
        )),
        Some(line) if extract_initials(line).is_empty() => checks.push(CheckEntry::fail(
            SECTION,
            "supervisor_initials",
            Severity::Warning,
            "Supervisor line carries no initials (expected format: А.В.)",
        )),
        Some(_) => checks.push(CheckEntry::pass(
            SECTION,
            "supervisor",
            "Supervisor line present",
        )),
    }
}

/// Executors may be named on the title page line (Исполнитель) or, for
/// multi-person work, in the СПИСОК ИСПОЛНИТЕЛЕЙ section. Either form
/// satisfies the check.
fn check_executors(model: &DocumentModel, checks: &mut Vec<CheckEntry>) {
    match &model.title_page.author {
        Some(line) => {
            checks.push(CheckEntry::pass(
                SECTION,
                "executor",
                "Executor line present on the title page",
            ));
            if extract_initials(line).is_empty() {
                checks.push(CheckEntry::fail(
                    SECTION,
                    "executor_initials",
                    Severity::Warning,
                    "Executor line carries no initials (expected format: А.В.)",
                ));
            }
        }
        None if !model.executors.is_empty() => checks.push(CheckEntry::pass(
            SECTION,
            "executor",
            "Executor list (СПИСОК ИСПОЛНИТЕЛЕЙ) present",
        )),
        None => checks.push(CheckEntry::fail(
            SECTION,
            "executor",
            Severity::Warning,
            "Neither an executor line (Исполнитель) nor a СПИСОК ИСПОЛНИТЕЛЕЙ section found",
        )),
    }

    if !model.executors.is_empty()
        && !model
            .executors
            .iter()
            .any(|line| !extract_initials(line).is_empty())
    {
        checks.push(CheckEntry::fail(
            SECTION,
            "executor_list_initials",
            Severity::Warning,
            "No entry of the executor list carries initials (expected format: А.В.)",
        ));
    }
}

fn check_place_and_year(title: &shared_types::TitlePage, checks: &mut Vec<CheckEntry>) {
    match title.year {
        None => checks.push(CheckEntry::fail(
            SECTION,
            "year",
            Severity::Error,
            "Year not found at the bottom of the title page",
        )),
        Some(year) => {
            let current = chrono::Utc::now().year();
            if year > current {
                checks.push(CheckEntry::fail(
                    SECTION,
                    "year",
                    Severity::Error,
                    format!("Title page year {year} is in the future (current year {current})"),
                ));
            } else {
                checks.push(CheckEntry::pass(SECTION, "year", "Year present"));
            }
        }
    }

    if title.place.is_none() {
        checks.push(CheckEntry::fail(
            SECTION,
            "place",
            Severity::Warning,
            "Place (city) is recommended at the bottom of the title page",
        ));
    } else {
        checks.push(CheckEntry::pass(SECTION, "place", "Place present"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{Signature, TitlePage};

    fn compliant_title() -> TitlePage {
        TitlePage {
            organization: "МИНИСТЕРСТВО НАУКИ И ВЫСШЕГО ОБРАЗОВАНИЯ".to_string(),
            document_type: "ОТЧЕТ\nО НАУЧНО-ИССЛЕДОВАТЕЛЬСКОЙ РАБОТЕ".to_string(),
            signatures: vec![Signature {
                role: "УТВЕРЖДАЮ".to_string(),
                name: "Директор А.В. Иванов".to_string(),
                present: true,
            }],
            udc_index: "УДК 004.056.5".to_string(),
            registration_number: Some("Рег. N НИОКТР 123".to_string()),
            supervisor: Some("Руководитель НИР С.П. Петров".to_string()),
            author: Some("Исполнитель Б.Г. Сидоров".to_string()),
            place: Some("Москва".to_string()),
            year: Some(2024),
        }
    }

    fn model_with(title: TitlePage) -> DocumentModel {
        DocumentModel {
            title_page: title,
            ..Default::default()
        }
    }

    #[test]
    fn test_compliant_title_page_has_no_failures() {
        let checks = check_title_page(&model_with(compliant_title()), &RuleConfig::default());
        assert!(checks.iter().all(|c| c.passed), "failures: {:?}", checks);
    }

    #[test]
    fn test_missing_organization_is_error() {
        let mut title = compliant_title();
        title.organization = String::new();
        let checks = check_title_page(&model_with(title), &RuleConfig::default());
        assert!(checks
            .iter()
            .any(|c| c.name == "organization_present" && !c.passed && c.severity == Severity::Error));
    }

    #[test]
    fn test_lowercase_organization_is_error() {
        let mut title = compliant_title();
        title.organization = "Министерство науки".to_string();
        let checks = check_title_page(&model_with(title), &RuleConfig::default());
        assert!(checks.iter().any(|c| c.name == "organization_uppercase" && !c.passed));
    }

    #[test]
    fn test_missing_required_stamp_is_error() {
        let mut title = compliant_title();
        title.signatures.clear();
        let checks = check_title_page(&model_with(title), &RuleConfig::default());
        assert!(checks
            .iter()
            .any(|c| c.name == "signature_role" && !c.passed && c.severity == Severity::Error));
    }

    #[test]
    fn test_udc_missing_vs_malformed() {
        let mut absent = compliant_title();
        absent.udc_index = String::new();
        let checks = check_title_page(&model_with(absent), &RuleConfig::default());
        assert!(checks
            .iter()
            .any(|c| c.name == "udc_present" && !c.passed && c.severity == Severity::Error));

        let mut malformed = compliant_title();
        malformed.udc_index = "УДК не заполнен".to_string();
        let checks = check_title_page(&model_with(malformed), &RuleConfig::default());
        assert!(checks
            .iter()
            .any(|c| c.name == "udc_format" && !c.passed && c.severity == Severity::Warning));
    }

    #[test]
    fn test_udc_malformed_severity_is_tunable() {
        let config = RuleConfig {
            udc_malformed_severity: Severity::Error,
            ..Default::default()
        };
        let mut title = compliant_title();
        title.udc_index = "УДК б/н".to_string();
        let checks = check_title_page(&model_with(title), &config);
        assert!(checks
            .iter()
            .any(|c| c.name == "udc_format" && c.severity == Severity::Error));
    }

    #[test]
    fn test_registration_number_severity_follows_config() {
        let mut title = compliant_title();
        title.registration_number = None;

        let checks = check_title_page(&model_with(title.clone()), &RuleConfig::default());
        assert!(checks
            .iter()
            .any(|c| c.name == "registration_number" && c.severity == Severity::Warning));

        let strict = RuleConfig {
            require_registration_number: true,
            ..Default::default()
        };
        let checks = check_title_page(&model_with(title), &strict);
        assert!(checks
            .iter()
            .any(|c| c.name == "registration_number" && c.severity == Severity::Error));
    }

    #[test]
    fn test_no_executor_anywhere_is_warning() {
        let mut title = compliant_title();
        title.author = None;
        let checks = check_title_page(&model_with(title), &RuleConfig::default());
        assert!(checks
            .iter()
            .any(|c| c.name == "executor" && !c.passed && c.severity == Severity::Warning));
    }

    #[test]
    fn test_executor_list_substitutes_for_executor_line() {
        let mut title = compliant_title();
        title.author = None;
        let model = DocumentModel {
            title_page: title,
            executors: vec![
                "Руководитель темы С.П. Петров".to_string(),
                "Исполнитель Б.Г. Сидоров".to_string(),
            ],
            ..Default::default()
        };
        let checks = check_title_page(&model, &RuleConfig::default());
        assert!(checks.iter().any(|c| c.name == "executor" && c.passed));
        assert!(!checks.iter().any(|c| c.name == "executor_list_initials"));
    }

    #[test]
    fn test_executor_line_without_initials_is_warning() {
        let mut title = compliant_title();
        title.author = Some("Исполнитель Сидоров".to_string());
        let checks = check_title_page(&model_with(title), &RuleConfig::default());
        assert!(checks.iter().any(|c| c.name == "executor" && c.passed));
        assert!(checks
            .iter()
            .any(|c| c.name == "executor_initials" && !c.passed));
    }

    #[test]
    fn test_executor_list_without_initials_is_warning() {
        let model = DocumentModel {
            title_page: compliant_title(),
            executors: vec!["Руководитель темы".to_string(), "Исполнитель".to_string()],
            ..Default::default()
        };
        let checks = check_title_page(&model, &RuleConfig::default());
        assert!(checks
            .iter()
            .any(|c| c.name == "executor_list_initials" && !c.passed
                && c.severity == Severity::Warning));
    }

    #[test]
    fn test_missing_supervisor_is_warning() {
        let mut title = compliant_title();
        title.supervisor = None;
        let checks = check_title_page(&model_with(title), &RuleConfig::default());
        assert!(checks
            .iter()
            .any(|c| c.name == "supervisor" && !c.passed && c.severity == Severity::Warning));
    }

    #[test]
    fn test_future_year_is_error() {
        let mut title = compliant_title();
        title.year = Some(chrono::Utc::now().year() + 1);
        let checks = check_title_page(&model_with(title), &RuleConfig::default());
        assert!(checks.iter().any(|c| c.name == "year" && !c.passed));
    }
}
