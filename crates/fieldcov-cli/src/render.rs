//! # Report Rendering
//!
//! Text and JSON renderings of coverage reports. Every function writes to
//! a caller-supplied [`Write`] so output can be captured in tests.

use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use fieldcov_schema::{CoverageReport, FieldSchema, RunSummary};

const RULE: &str = "============================================================";

/// Extra fields listed by name before the rest are counted.
pub const EXTRA_FIELDS_SHOWN: usize = 10;

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report.
    #[default]
    Text,
    /// One JSON object with every report and the run summary.
    Json,
}

/// Schema overview included in JSON output.
#[derive(Debug, Serialize)]
pub struct SchemaOverview {
    /// Path the schema was loaded from.
    pub path: String,
    /// Number of declared fields.
    pub total: usize,
    /// Number of required fields.
    pub required: usize,
    /// Number of optional fields.
    pub optional: usize,
}

impl SchemaOverview {
    /// Overview of a loaded schema.
    pub fn new(path: &Path, schema: &FieldSchema) -> Self {
        Self {
            path: path.display().to_string(),
            total: schema.len(),
            required: schema.required_count(),
            optional: schema.optional_count(),
        }
    }
}

/// Complete JSON output of one run.
#[derive(Debug, Serialize)]
pub struct RunOutput<'a> {
    /// The schema the run validated against.
    pub schema: SchemaOverview,
    /// One report per analyzed document, in analysis order.
    pub reports: &'a [CoverageReport],
    /// Run-level totals.
    pub summary: &'a RunSummary,
}

/// Write the run header: schema location and field counts.
pub fn write_header(out: &mut impl Write, path: &Path, schema: &FieldSchema) -> io::Result<()> {
    writeln!(out, "Field definition file: {}", path.display())?;
    writeln!(
        out,
        "Total fields: {} (required: {}, optional: {})",
        schema.len(),
        schema.required_count(),
        schema.optional_count()
    )
}

/// Write one document's report.
///
/// With `verbose` false, missing optional fields and extra fields are
/// omitted; missing required fields are always shown.
pub fn write_report(out: &mut impl Write, report: &CoverageReport, verbose: bool) -> io::Result<()> {
    let status = if report.valid { "PASS" } else { "FAIL" };
    writeln!(out)?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "[{status}] {}", report.file)?;
    writeln!(out, "{RULE}")?;
    writeln!(
        out,
        "Coverage: {:.1}% ({}/{})",
        report.coverage_rate, report.covered, report.total_defined
    )?;

    if !report.missing_required.is_empty() {
        writeln!(out)?;
        writeln!(
            out,
            "[ERROR] Missing required fields ({}):",
            report.missing_required.len()
        )?;
        for field in &report.missing_required {
            writeln!(out, "  - {field}")?;
        }
    }

    if verbose && !report.missing_optional.is_empty() {
        writeln!(out)?;
        writeln!(
            out,
            "[WARN] Missing optional fields ({}):",
            report.missing_optional.len()
        )?;
        for category in report.missing_by_category.keys() {
            let optional = report.missing_optional_in(category);
            if !optional.is_empty() {
                writeln!(out, "  [{category}]: {}", optional.join(", "))?;
            }
        }
    }

    if verbose && !report.extra_fields.is_empty() {
        let extra = &report.extra_fields;
        let shown = &extra[..extra.len().min(EXTRA_FIELDS_SHOWN)];
        writeln!(out)?;
        writeln!(out, "[INFO] Extra fields ({}):", extra.len())?;
        writeln!(out, "  {}", shown.join(", "))?;
        if extra.len() > EXTRA_FIELDS_SHOWN {
            writeln!(out, "  ... and {} more", extra.len() - EXTRA_FIELDS_SHOWN)?;
        }
    }

    Ok(())
}

/// Write the run summary block.
pub fn write_summary(out: &mut impl Write, summary: &RunSummary) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "Summary")?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "Validation passed: {}/{}", summary.passed, summary.total)?;
    if summary.skipped > 0 {
        writeln!(out, "Skipped (unreadable): {}", summary.skipped)?;
    }
    writeln!(out, "Average coverage: {:.1}%", summary.average_coverage)
}

/// Write the whole run as pretty-printed JSON.
pub fn write_json(out: &mut impl Write, output: &RunOutput<'_>) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, output)?;
    writeln!(out)
}
