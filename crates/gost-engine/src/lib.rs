//! GOST 7.32-2017 validation engine.
//!
//! The caller always receives either a complete `ValidationReport` or a
//! single `ExtractionError`. Document defects are check entries inside
//! the report; a validator's internal failure is caught, downgraded to
//! one error-severity entry and never aborts the run.

pub mod extract;
pub mod patterns;
pub mod validators;

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::{Duration, Instant};

use shared_docx::RawDocument;
use shared_types::{CheckEntry, DocumentModel, RuleConfig, SectionTag, Severity, ValidationReport};

pub use extract::ExtractionError;

type ValidatorFn = fn(&DocumentModel, &RuleConfig) -> Vec<CheckEntry>;

/// The closed validator set, in report order. Checks appear in the
/// final report grouped in exactly this order.
const VALIDATORS: &[(SectionTag, ValidatorFn)] = &[
    (SectionTag::TitlePage, validators::title_page::check_title_page),
    (SectionTag::Abstract, validators::abstract_page::check_abstract),
    (SectionTag::Contents, validators::contents::check_contents),
    (SectionTag::Terms, validators::terms::check_terms),
    (
        SectionTag::Abbreviations,
        validators::abbreviations::check_abbreviations,
    ),
    (
        SectionTag::Formatting,
        validators::formatting::check_formatting,
    ),
    (SectionTag::Structure, validators::structure::check_structure),
];

/// Run lifecycle. `Failed` is terminal and only reachable from
/// `Extracting`; validator trouble never leads there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    Init,
    Extracting,
    Validating,
    Merged,
    Done,
    Failed,
}

/// GostEngine entry point.
pub struct GostEngine {
    config: RuleConfig,
}

impl GostEngine {
    pub fn new(config: RuleConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RuleConfig {
        &self.config
    }

    /// Full run over DOCX bytes: read the container, extract the model,
    /// validate.
    pub fn check_bytes(
        &self,
        bytes: &[u8],
        filename: &str,
    ) -> Result<ValidationReport, ExtractionError> {
        let raw = shared_docx::read_docx(bytes)?;
        self.check_document(&raw, filename)
    }

    /// Run over an already-read paragraph stream.
    pub fn check_document(
        &self,
        raw: &RawDocument,
        filename: &str,
    ) -> Result<ValidationReport, ExtractionError> {
        let mut state = RunState::Init;
        tracing::debug!(filename, ?state, "run started");

        state = RunState::Extracting;
        tracing::trace!(filename, ?state, paragraphs = raw.paragraphs.len(), "extracting");
        let model = match extract::extract(raw, filename) {
            Ok(model) => model,
            Err(err) => {
                state = RunState::Failed;
                tracing::warn!(filename, ?state, error = %err, "extraction failed, no validators run");
                return Err(err);
            }
        };

        state = RunState::Validating;
        tracing::debug!(filename, ?state, "model extracted");
        let report = self.validate(&model);

        state = RunState::Done;
        tracing::debug!(filename, ?state, status = ?report.status, checks = report.checks.len(), "run finished");
        Ok(report)
    }

    /// Validate an extracted model. Pure over the model: running twice
    /// yields identical reports.
    pub fn validate(&self, model: &DocumentModel) -> ValidationReport {
        let mut checks = Vec::new();
        for (section, validator) in VALIDATORS {
            checks.extend(run_guarded(*section, *validator, model, &self.config));
        }
        tracing::trace!(state = ?RunState::Merged, checks = checks.len(), "checks merged");
        ValidationReport::from_checks(model.filename.clone(), checks)
    }
}

impl Default for GostEngine {
    fn default() -> Self {
        Self::new(RuleConfig::default())
    }
}

/// Execute one validator, converting a panic or a budget breach into a
/// single error entry attributed to the validator's section. An internal
/// failure of one validator must never sink the run.
///
/// The budget is checked only after the validator returns; a validator
/// that never returns is not interrupted. Validators are straight-line
/// passes over the model with non-backtracking regex matching, so a
/// breach signals pathological input size, not a hang.
fn run_guarded(
    section: SectionTag,
    validator: ValidatorFn,
    model: &DocumentModel,
    config: &RuleConfig,
) -> Vec<CheckEntry> {
    let started = Instant::now();
    let outcome = catch_unwind(AssertUnwindSafe(|| validator(model, config)));
    let elapsed = started.elapsed();

    match outcome {
        Ok(checks) => {
            let budget = Duration::from_millis(config.validator_budget_ms);
            if config.validator_budget_ms > 0 && elapsed > budget {
                tracing::error!(section = section.as_str(), ?elapsed, "validator exceeded its budget");
                return vec![internal_failure(
                    section,
                    format!(
                        "validator exceeded its {} ms budget ({} ms)",
                        config.validator_budget_ms,
                        elapsed.as_millis()
                    ),
                )];
            }
            checks
        }
        Err(payload) => {
            let reason = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            tracing::error!(section = section.as_str(), reason, "validator panicked");
            vec![internal_failure(section, reason)]
        }
    }
}

fn internal_failure(section: SectionTag, reason: String) -> CheckEntry {
    CheckEntry::fail(
        section,
        "validator_internal",
        Severity::Error,
        format!(
            "Internal failure in the {} validator: {reason}",
            section.as_str()
        ),
    )
}
