//! Tunable thresholds of the standard.
//!
//! Nothing numeric is hard-coded in the validators; a different revision
//! of the standard is a different `RuleConfig` value. Defaults follow
//! GOST 7.32-2017.

use serde::{Deserialize, Serialize};

use crate::report::Severity;

/// Page margins in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top_mm: f32,
    pub bottom_mm: f32,
    pub left_mm: f32,
    pub right_mm: f32,
}

/// What to do when an optional structural element is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbsencePolicy {
    Warn,
    Skip,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    /// Below this the abstract length is a recommendation-level finding.
    pub min_abstract_chars: usize,
    /// Above this the abstract length is an error.
    pub max_abstract_chars: usize,
    pub min_keywords: usize,
    pub max_keywords: usize,
    /// Approval-stamp roles that must appear on the title page.
    pub required_signature_roles: Vec<String>,
    pub allowed_fonts: Vec<String>,
    pub allowed_font_sizes: Vec<f32>,
    pub expected_margins: Margins,
    /// Tolerance applied to each margin side, millimetres.
    pub margin_tolerance: f32,
    pub expected_line_spacing: f32,
    /// Body headings that must be present, checked case-insensitively.
    pub mandatory_headings: Vec<String>,
    pub require_registration_number: bool,
    /// Severity for a UDC index that is present but malformed. Absence
    /// is always an error.
    pub udc_malformed_severity: Severity,
    /// Policy when the abbreviation list is absent and the body does not
    /// appear to use abbreviations.
    pub missing_abbreviation_list: AbsencePolicy,
    /// Wall-clock budget per validator; a breach is treated as an
    /// internal validator failure.
    pub validator_budget_ms: u64,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            min_abstract_chars: 850,
            max_abstract_chars: 2000,
            min_keywords: 5,
            max_keywords: 15,
            required_signature_roles: vec!["УТВЕРЖДАЮ".to_string()],
            allowed_fonts: vec!["Times New Roman".to_string()],
            allowed_font_sizes: vec![12.0, 14.0],
            expected_margins: Margins {
                top_mm: 20.0,
                bottom_mm: 20.0,
                left_mm: 30.0,
                right_mm: 15.0,
            },
            margin_tolerance: 2.0,
            expected_line_spacing: 1.5,
            mandatory_headings: vec![
                "ВВЕДЕНИЕ".to_string(),
                "ЗАКЛЮЧЕНИЕ".to_string(),
                "СПИСОК ИСПОЛЬЗОВАННЫХ ИСТОЧНИКОВ".to_string(),
            ],
            require_registration_number: false,
            udc_malformed_severity: Severity::Warning,
            missing_abbreviation_list: AbsencePolicy::Warn,
            validator_budget_ms: 2000,
        }
    }
}

impl RuleConfig {
    pub fn font_allowed(&self, name: &str) -> bool {
        self.allowed_fonts.iter().any(|f| f.eq_ignore_ascii_case(name))
    }

    pub fn font_size_allowed(&self, size: f32) -> bool {
        self.allowed_font_sizes.iter().any(|s| (s - size).abs() < 0.01)
    }
}
