//! Section validators.
//!
//! Each module owns one slice of the document model and enumerates its
//! checks in a fixed, documented order. Validators are pure over the
//! model and total: non-compliant content is a finding with
//! `passed = false`, never an error. Thresholds come from `RuleConfig`,
//! nothing numeric is hard-coded here.

pub mod abbreviations;
pub mod abstract_page;
pub mod contents;
pub mod formatting;
pub mod structure;
pub mod terms;
pub mod title_page;
