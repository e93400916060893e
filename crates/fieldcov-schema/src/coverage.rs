//! # Coverage Analysis
//!
//! Compares the fields a schema declares against the fields extracted from
//! one document and produces a [`CoverageReport`].
//!
//! ## Pass/fail rule
//!
//! A document is valid iff no required field is missing. Missing optional
//! fields and extra (undeclared) fields are reported but never fail
//! validation. An invalid document is report data, not an error: only
//! unreadable input surfaces as `Err`.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use fieldcov_core::{AliasTable, DocumentReadError};

use crate::extract::extract_fields_with;
use crate::fields::FieldSchema;

/// Coverage of one document against the field schema.
///
/// Serializes with the same snake_case keys it is documented with here,
/// so `--format json` output is stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageReport {
    /// Identifier of the analyzed document (its file name).
    pub file: String,
    /// Number of fields the schema declares.
    pub total_defined: usize,
    /// Number of declared fields present in the document.
    pub covered: usize,
    /// Number of declared fields absent from the document.
    pub missing: usize,
    /// Number of document fields the schema does not declare.
    pub extra: usize,
    /// `100 * covered / total_defined`, or `100` for an empty schema.
    pub coverage_rate: f64,
    /// Missing required fields, sorted.
    pub missing_required: Vec<String>,
    /// Missing optional fields, sorted.
    pub missing_optional: Vec<String>,
    /// Missing fields grouped by category, each list sorted.
    pub missing_by_category: BTreeMap<String, Vec<String>>,
    /// Undeclared fields present in the document, sorted.
    pub extra_fields: Vec<String>,
    /// True iff `missing_required` is empty.
    pub valid: bool,
}

impl CoverageReport {
    /// Missing optional fields of one category, in sorted order.
    pub fn missing_optional_in(&self, category: &str) -> Vec<&str> {
        self.missing_by_category
            .get(category)
            .map(|fields| {
                fields
                    .iter()
                    .filter(|&f| self.missing_optional.binary_search(f).is_ok())
                    .map(String::as_str)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Compare a schema against an extracted field set.
///
/// Pure function of its inputs.
pub fn analyze(
    schema: &FieldSchema,
    extracted: &BTreeSet<String>,
    file: impl Into<String>,
) -> CoverageReport {
    let all = schema.all_fields();
    let required = schema.required_fields();

    let covered = all.intersection(extracted).count();
    let missing: Vec<&String> = all.difference(extracted).collect();
    let extra_fields: Vec<String> = extracted.difference(all).cloned().collect();

    let mut missing_required = Vec::new();
    let mut missing_optional = Vec::new();
    let mut missing_by_category: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for &name in &missing {
        if required.contains(name) {
            missing_required.push(name.clone());
        } else {
            missing_optional.push(name.clone());
        }
        missing_by_category
            .entry(schema.category_of(name).to_string())
            .or_default()
            .push(name.clone());
    }

    let coverage_rate = if all.is_empty() {
        100.0
    } else {
        covered as f64 / all.len() as f64 * 100.0
    };

    CoverageReport {
        file: file.into(),
        total_defined: all.len(),
        covered,
        missing: missing.len(),
        extra: extra_fields.len(),
        coverage_rate,
        valid: missing_required.is_empty(),
        missing_required,
        missing_optional,
        missing_by_category,
        extra_fields,
    }
}

/// Analyzes documents against one schema.
///
/// Holds the schema and alias table by reference; any number of documents
/// can be analyzed with the same analyzer.
#[derive(Debug, Clone, Copy)]
pub struct CoverageAnalyzer<'a> {
    schema: &'a FieldSchema,
    aliases: &'a AliasTable,
}

impl<'a> CoverageAnalyzer<'a> {
    /// Analyzer using the built-in category alias table.
    pub fn new(schema: &'a FieldSchema) -> Self {
        Self {
            schema,
            aliases: AliasTable::builtin(),
        }
    }

    /// Replace the alias table used for extraction.
    pub fn with_aliases(mut self, aliases: &'a AliasTable) -> Self {
        self.aliases = aliases;
        self
    }

    /// The schema this analyzer compares against.
    pub fn schema(&self) -> &FieldSchema {
        self.schema
    }

    /// Extract fields from a parsed document and analyze them.
    pub fn analyze_value(&self, document: &Value, file: impl Into<String>) -> CoverageReport {
        let file = file.into();
        let extracted = extract_fields_with(document, self.aliases);
        tracing::debug!(file = %file, fields = extracted.len(), "extracted document fields");
        analyze(self.schema, &extracted, file)
    }

    /// Read, parse and analyze a JSON document from disk.
    ///
    /// The report's `file` is the document's file name.
    ///
    /// # Errors
    ///
    /// Returns a [`DocumentReadError`] if the file does not exist, cannot
    /// be read, or is not valid JSON.
    pub fn analyze_file(&self, path: &Path) -> Result<CoverageReport, DocumentReadError> {
        let document = read_document(path)?;
        let file = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(self.analyze_value(&document, file))
    }
}

/// Read and parse one JSON document.
///
/// The parser rejects documents nested more than 128 levels deep; such a
/// document is reported as a [`DocumentReadError::Parse`].
pub fn read_document(path: &Path) -> Result<Value, DocumentReadError> {
    if !path.is_file() {
        return Err(DocumentReadError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path).map_err(|source| DocumentReadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| DocumentReadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
