//! Compliance report types shared between the engine and its front ends.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Overall outcome of one validation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    Pass,
    Warnings,
    Failed,
}

/// Which slice of the document a check belongs to. The set is closed;
/// the engine dispatches over it with a fixed table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionTag {
    TitlePage,
    Abstract,
    Contents,
    Terms,
    Abbreviations,
    Formatting,
    Structure,
}

impl SectionTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionTag::TitlePage => "title_page",
            SectionTag::Abstract => "abstract",
            SectionTag::Contents => "contents",
            SectionTag::Terms => "terms",
            SectionTag::Abbreviations => "abbreviations",
            SectionTag::Formatting => "formatting",
            SectionTag::Structure => "structure",
        }
    }
}

/// One atomic finding. A non-compliant document is data, not an error:
/// defects are entries with `passed = false`, never exceptions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckEntry {
    pub section: SectionTag,
    pub name: String,
    pub severity: Severity,
    pub message: String,
    pub passed: bool,
}

impl CheckEntry {
    pub fn pass(section: SectionTag, name: &str, message: impl Into<String>) -> Self {
        Self {
            section,
            name: name.to_string(),
            severity: Severity::Info,
            message: message.into(),
            passed: true,
        }
    }

    pub fn fail(
        section: SectionTag,
        name: &str,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            section,
            name: name.to_string(),
            severity,
            message: message.into(),
            passed: false,
        }
    }
}

/// Final report: ordered checks plus the reduced status. Immutable once
/// the engine hands it out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub filename: String,
    pub status: RunStatus,
    pub checks: Vec<CheckEntry>,
}

impl ValidationReport {
    /// Concatenates per-validator check lists and reduces them to an
    /// overall status: Failed if any failed Error, else Warnings if any
    /// failed Warning, else Pass.
    pub fn from_checks(filename: String, checks: Vec<CheckEntry>) -> Self {
        let status = reduce_status(&checks);
        Self {
            filename,
            status,
            checks,
        }
    }

    pub fn failed_checks(&self) -> impl Iterator<Item = &CheckEntry> {
        self.checks.iter().filter(|c| !c.passed)
    }
}

pub fn reduce_status(checks: &[CheckEntry]) -> RunStatus {
    let mut has_warning = false;
    for check in checks {
        if check.passed {
            continue;
        }
        match check.severity {
            Severity::Error => return RunStatus::Failed,
            Severity::Warning => has_warning = true,
            Severity::Info => {}
        }
    }
    if has_warning {
        RunStatus::Warnings
    } else {
        RunStatus::Pass
    }
}
