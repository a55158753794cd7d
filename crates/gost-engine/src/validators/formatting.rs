//! General formatting checks: fonts per paragraph class, line spacing,
//! page margins.
//!
//! Font mismatches are reported per paragraph class, never per
//! paragraph, to keep the report readable on documents with thousands
//! of paragraphs.

use shared_types::{
    CheckEntry, DocumentModel, FontSample, ParagraphClass, RuleConfig, SectionTag, Severity,
};

const SECTION: SectionTag = SectionTag::Formatting;

/// Classes in report order.
const CLASSES: &[ParagraphClass] = &[
    ParagraphClass::Title,
    ParagraphClass::Heading,
    ParagraphClass::Body,
    ParagraphClass::Caption,
];

pub fn check_formatting(model: &DocumentModel, config: &RuleConfig) -> Vec<CheckEntry> {
    let mut checks = Vec::new();
    let formatting = &model.formatting;

    check_fonts(&formatting.samples, config, &mut checks);
    check_line_spacing(formatting.line_spacing, config, &mut checks);
    check_margins(formatting.margins, config, &mut checks);

    checks
}

fn check_fonts(samples: &[FontSample], config: &RuleConfig, checks: &mut Vec<CheckEntry>) {
    if samples.is_empty() {
        // Documents styled entirely through defaults expose no run
        // properties; nothing to verify.
        checks.push(CheckEntry::pass(
            SECTION,
            "fonts",
            "No font information sampled; font checks skipped",
        ));
        return;
    }

    for class in CLASSES {
        let class_samples: Vec<&FontSample> =
            samples.iter().filter(|s| s.class == *class).collect();
        if class_samples.is_empty() {
            continue;
        }

        let mut bad_fonts: Vec<&str> = Vec::new();
        let mut bad_sizes: Vec<f32> = Vec::new();
        for sample in &class_samples {
            if let Some(name) = &sample.font_name {
                if !config.font_allowed(name) && !bad_fonts.contains(&name.as_str()) {
                    bad_fonts.push(name.as_str());
                }
            }
            if let Some(size) = sample.font_size {
                if !config.font_size_allowed(size) && !bad_sizes.iter().any(|s| (s - size).abs() < 0.01)
                {
                    bad_sizes.push(size);
                }
            }
        }

        if bad_fonts.is_empty() && bad_sizes.is_empty() {
            checks.push(CheckEntry::pass(
                SECTION,
                "fonts",
                format!("Fonts for {} paragraphs within the whitelist", class.as_str()),
            ));
        } else {
            let mut parts = Vec::new();
            if !bad_fonts.is_empty() {
                parts.push(format!("fonts [{}]", bad_fonts.join(", ")));
            }
            if !bad_sizes.is_empty() {
                let sizes: Vec<String> = bad_sizes.iter().map(|s| format!("{s} pt")).collect();
                parts.push(format!("sizes [{}]", sizes.join(", ")));
            }
            checks.push(CheckEntry::fail(
                SECTION,
                "fonts",
                Severity::Error,
                format!(
                    "Disallowed {} used in {} paragraphs",
                    parts.join(" and "),
                    class.as_str()
                ),
            ));
        }
    }
}

fn check_line_spacing(spacing: Option<f32>, config: &RuleConfig, checks: &mut Vec<CheckEntry>) {
    match spacing {
        None => checks.push(CheckEntry::pass(
            SECTION,
            "line_spacing",
            "Line spacing not declared; check skipped",
        )),
        Some(value) if (value - config.expected_line_spacing).abs() <= 0.05 => {
            checks.push(CheckEntry::pass(
                SECTION,
                "line_spacing",
                format!("Line spacing {value} matches expected"),
            ))
        }
        Some(value) => checks.push(CheckEntry::fail(
            SECTION,
            "line_spacing",
            Severity::Warning,
            format!(
                "Line spacing {value} differs from expected {}",
                config.expected_line_spacing
            ),
        )),
    }
}

fn check_margins(
    margins: Option<shared_types::Margins>,
    config: &RuleConfig,
    checks: &mut Vec<CheckEntry>,
) {
    let Some(margins) = margins else {
        checks.push(CheckEntry::fail(
            SECTION,
            "margins",
            Severity::Warning,
            "Page margins not declared in the document",
        ));
        return;
    };

    let expected = &config.expected_margins;
    let tolerance = config.margin_tolerance;
    let sides = [
        ("left", margins.left_mm, expected.left_mm),
        ("right", margins.right_mm, expected.right_mm),
        ("top", margins.top_mm, expected.top_mm),
        ("bottom", margins.bottom_mm, expected.bottom_mm),
    ];

    let offending: Vec<String> = sides
        .iter()
        .filter(|(_, actual, wanted)| (actual - wanted).abs() > tolerance)
        .map(|(side, actual, wanted)| format!("{side} {actual:.1} mm (expected {wanted:.1} mm)"))
        .collect();

    if offending.is_empty() {
        checks.push(CheckEntry::pass(
            SECTION,
            "margins",
            "Page margins within tolerance",
        ));
    } else {
        checks.push(CheckEntry::fail(
            SECTION,
            "margins",
            Severity::Error,
            format!("Page margins out of tolerance: {}", offending.join(", ")),
        ));
    }
}
