//! Command-line front end for the GOST 7.32-2017 validation engine.
//!
//! Exit codes: 0 compliant, 1 warnings only, 2 failed checks,
//! 3 the document could not be read at all.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use gost_engine::GostEngine;
use shared_types::{RuleConfig, RunStatus, SectionTag, Severity, ValidationReport};

#[derive(Parser)]
#[command(name = "gost-check")]
#[command(version)]
#[command(about = "Check a DOCX research report against GOST 7.32-2017", long_about = None)]
struct Cli {
    /// Path to the .docx file to validate
    file: PathBuf,

    /// Path to a JSON rule configuration overriding the defaults
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Emit the full report as JSON instead of the colored summary
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(report) => {
            if cli.json {
                // Serialization of our own report types cannot fail.
                println!("{}", serde_json::to_string_pretty(&report).unwrap());
            } else {
                render(&report);
            }
            match report.status {
                RunStatus::Pass => ExitCode::from(0),
                RunStatus::Warnings => ExitCode::from(1),
                RunStatus::Failed => ExitCode::from(2),
            }
        }
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::from(3)
        }
    }
}

fn run(cli: &Cli) -> Result<ValidationReport> {
    let config = match &cli.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str::<RuleConfig>(&raw)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => RuleConfig::default(),
    };

    let bytes =
        fs::read(&cli.file).with_context(|| format!("reading {}", cli.file.display()))?;
    let filename = cli
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| cli.file.display().to_string());

    let engine = GostEngine::new(config);
    let report = engine
        .check_bytes(&bytes, &filename)
        .with_context(|| format!("validating {}", cli.file.display()))?;
    Ok(report)
}

fn section_title(tag: SectionTag) -> &'static str {
    match tag {
        SectionTag::TitlePage => "Title page",
        SectionTag::Abstract => "Abstract",
        SectionTag::Contents => "Table of contents",
        SectionTag::Terms => "Terms and definitions",
        SectionTag::Abbreviations => "Abbreviations",
        SectionTag::Formatting => "Formatting",
        SectionTag::Structure => "Document structure",
    }
}

fn render(report: &ValidationReport) {
    println!("{} {}", "Report:".bold(), report.filename);
    println!();

    let mut current: Option<SectionTag> = None;
    for check in &report.checks {
        if current != Some(check.section) {
            current = Some(check.section);
            println!("{}", section_title(check.section).bold().underline());
        }
        let marker = if check.passed {
            "ok".green()
        } else {
            match check.severity {
                Severity::Error => "ERROR".red().bold(),
                Severity::Warning => "warn".yellow(),
                Severity::Info => "info".normal(),
            }
        };
        println!("  [{marker}] {}", check.message);
    }

    println!();
    let failed = report.checks.iter().filter(|c| !c.passed).count();
    let verdict = match report.status {
        RunStatus::Pass => "COMPLIANT".green().bold(),
        RunStatus::Warnings => "WARNINGS".yellow().bold(),
        RunStatus::Failed => "NOT COMPLIANT".red().bold(),
    };
    println!(
        "{verdict}: {} checks, {} findings",
        report.checks.len(),
        failed
    );
}
