//! # Run Summary
//!
//! Aggregates the coverage reports of one run.

use serde::{Deserialize, Serialize};

use crate::coverage::CoverageReport;

/// Totals across every document analyzed in a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Number of documents analyzed.
    pub total: usize,
    /// Number of valid documents.
    pub passed: usize,
    /// Number of invalid documents.
    pub failed: usize,
    /// Documents that were named or discovered but could not be read.
    pub skipped: usize,
    /// Arithmetic mean of per-document coverage rates; `0` with no reports.
    pub average_coverage: f64,
}

impl RunSummary {
    /// Summarize a set of reports.
    pub fn from_reports(reports: &[CoverageReport]) -> Self {
        let total = reports.len();
        let passed = reports.iter().filter(|r| r.valid).count();
        let average_coverage = if reports.is_empty() {
            0.0
        } else {
            reports.iter().map(|r| r.coverage_rate).sum::<f64>() / total as f64
        };
        Self {
            total,
            passed,
            failed: total - passed,
            skipped: 0,
            average_coverage,
        }
    }

    /// Record documents that could not be read.
    pub fn with_skipped(mut self, skipped: usize) -> Self {
        self.skipped = skipped;
        self
    }

    /// False iff at least one analyzed document is invalid.
    ///
    /// A run that analyzed nothing is a success. Skipped documents do not
    /// affect the outcome.
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}
