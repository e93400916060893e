//! # Validate Command
//!
//! Loads the field schema, analyzes every discovered document, and renders
//! the reports and the run summary.
//!
//! A missing or malformed schema aborts the run before any document is
//! read. An unreadable document is reported and skipped. A document
//! missing required fields is reported and makes the run fail.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::Args;

use fieldcov_core::DocumentReadError;
use fieldcov_schema::{CoverageAnalyzer, FieldSchema, RunSummary};

use crate::discover::{discover_documents, locate_schema};
use crate::render::{self, OutputFormat, RunOutput, SchemaOverview};

/// Arguments for a validation run.
#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Path to fields.yaml. Falls back to ./fields.yaml and ../fields.yaml.
    #[arg(short = 'f', long = "fields", default_value = "fields.yaml")]
    pub fields: PathBuf,

    /// JSON files to validate. Overrides --dir.
    #[arg(short = 'j', long = "json", num_args = 0.., value_name = "PATH")]
    pub json: Vec<PathBuf>,

    /// Directory whose *.json files are validated.
    #[arg(short = 'd', long = "dir", default_value = "results")]
    pub dir: PathBuf,

    /// Show the coverage summary only; hide optional and extra field detail.
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl Default for ValidateArgs {
    fn default() -> Self {
        Self {
            fields: PathBuf::from("fields.yaml"),
            json: Vec::new(),
            dir: PathBuf::from("results"),
            quiet: false,
            format: OutputFormat::Text,
        }
    }
}

/// Execute a validation run.
///
/// Relative paths in `args` are resolved against `cwd`. Output is written
/// to `out`.
///
/// Returns exit code: 0 when every analyzed document is valid (including
/// when no documents were found), 1 when any document is missing a
/// required field.
///
/// # Errors
///
/// Fails if the schema cannot be located or loaded, or if writing to
/// `out` fails.
pub fn run_validate(args: &ValidateArgs, cwd: &Path, out: &mut impl Write) -> Result<u8> {
    let schema_path = locate_schema(&args.fields, cwd)
        .ok_or_else(|| anyhow!("fields.yaml not found: {}", args.fields.display()))?;
    let schema = FieldSchema::load(&schema_path)
        .with_context(|| format!("failed to load field schema {}", schema_path.display()))?;

    let text = args.format == OutputFormat::Text;
    if text {
        render::write_header(out, &schema_path, &schema)?;
    }

    let documents = discover_documents(&args.json, &args.dir, cwd);
    if documents.is_empty() {
        tracing::warn!(dir = %args.dir.display(), "no JSON documents to validate");
        if text {
            writeln!(out, "[WARN] No JSON files found")?;
        } else {
            let summary = RunSummary::from_reports(&[]);
            render::write_json(
                out,
                &RunOutput {
                    schema: SchemaOverview::new(&schema_path, &schema),
                    reports: &[],
                    summary: &summary,
                },
            )?;
        }
        return Ok(0);
    }

    let analyzer = CoverageAnalyzer::new(&schema);
    let mut reports = Vec::with_capacity(documents.len());
    let mut skipped = 0usize;

    for path in &documents {
        match analyzer.analyze_file(path) {
            Ok(report) => {
                tracing::info!(
                    file = %report.file,
                    coverage = report.coverage_rate,
                    valid = report.valid,
                    "analyzed document"
                );
                if text {
                    render::write_report(out, &report, !args.quiet)?;
                }
                reports.push(report);
            }
            Err(e) => {
                skipped += 1;
                tracing::warn!(path = %e.path().display(), error = %e, "skipping document");
                if text {
                    write_skip_warning(out, &e)?;
                }
            }
        }
    }

    let summary = RunSummary::from_reports(&reports).with_skipped(skipped);
    if text {
        render::write_summary(out, &summary)?;
    } else {
        render::write_json(
            out,
            &RunOutput {
                schema: SchemaOverview::new(&schema_path, &schema),
                reports: &reports,
                summary: &summary,
            },
        )?;
    }

    Ok(if summary.is_success() { 0 } else { 1 })
}

fn write_skip_warning(out: &mut impl Write, err: &DocumentReadError) -> std::io::Result<()> {
    match err {
        DocumentReadError::NotFound { path } => {
            writeln!(out, "[WARN] File not found: {}", path.display())
        }
        other => writeln!(out, "[WARN] Cannot read {}: {other}", other.path().display()),
    }
}
