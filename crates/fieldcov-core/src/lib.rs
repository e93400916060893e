#![deny(missing_docs)]

//! # fieldcov-core — Foundational Types for fieldcov
//!
//! This crate defines the types every other crate in the workspace depends
//! on. It has no internal crate dependencies.
//!
//! ## Key Design Principles
//!
//! 1. **Single [`Category`] enum.** One definition of the research
//!    categories and their container-key spellings. The [`AliasTable`] is
//!    derived from it once and is read-only afterwards.
//!
//! 2. **Structured errors.** [`SchemaError`] is fatal for a run,
//!    [`DocumentReadError`] is scoped to one document. Missing required
//!    fields are report data, never an error.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `fieldcov-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod category;
pub mod error;

pub use category::{AliasTable, Category};
pub use error::{DocumentReadError, SchemaError};

/// Keys that carry document metadata and are never counted as fields.
pub const RESERVED_KEYS: &[&str] = &["_source_file", "uncertain"];

/// Category name reported for a field with no registered category.
pub const UNKNOWN_CATEGORY: &str = "Unknown";
