//! # fieldcov-schema — Field Schema Loading & Coverage Analysis
//!
//! Checks that research-output JSON documents cover the fields declared in
//! a `fields.yaml` schema.
//!
//! ## Pipeline
//!
//! 1. [`FieldSchema`] (`fields`) loads the schema once and derives the
//!    declared, required and field-to-category lookups.
//! 2. [`extract_fields`] (`extract`) walks a document and collects the
//!    field names it contains, treating category containers as transparent.
//! 3. [`CoverageAnalyzer`] (`coverage`) compares the two sets and produces
//!    a [`CoverageReport`] per document.
//! 4. [`RunSummary`] (`summary`) aggregates the reports of a run.
//!
//! ## Crate Policy
//!
//! - Depends only on `fieldcov-core` internally.
//! - Extraction never fails; only unreadable input is an error.
//! - No type, format or range validation of field values. Coverage is
//!   about field presence only.

pub mod coverage;
pub mod extract;
pub mod fields;
pub mod summary;

pub use coverage::{analyze, read_document, CoverageAnalyzer, CoverageReport};
pub use extract::{extract_fields, extract_fields_with};
pub use fields::{CategoryDefinition, FieldDefinition, FieldSchema};
pub use summary::RunSummary;
