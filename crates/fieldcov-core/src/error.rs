//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types used across fieldcov. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Schema errors are fatal for a run: nothing can be analyzed without
//!   the field definitions.
//! - Document read errors are scoped to one file. The run continues with
//!   the remaining documents.
//! - A document missing required fields is not an error at all. It is
//!   reported through `CoverageReport::valid`.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to load or interpret the field schema (`fields.yaml`).
#[derive(Error, Debug)]
pub enum SchemaError {
    /// No schema file exists at the requested path or any fallback location.
    #[error("schema file not found: {}", path.display())]
    NotFound {
        /// The path that was requested.
        path: PathBuf,
    },

    /// The schema file exists but could not be read.
    #[error("cannot read schema file {}: {source}", path.display())]
    Io {
        /// Path of the schema file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The schema text is not valid YAML.
    #[error("invalid YAML in schema: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A field record has no `name`.
    #[error("field #{index} in category '{category}' has no name")]
    MissingFieldName {
        /// Category the nameless field was declared under.
        category: String,
        /// Zero-based position of the field within its category.
        index: usize,
    },

    /// A field record's `name` is a list or mapping instead of a scalar.
    #[error("field #{index} in category '{category}' has a name that is not a string")]
    InvalidFieldName {
        /// Category the field was declared under.
        category: String,
        /// Zero-based position of the field within its category.
        index: usize,
    },

    /// A category record has no `category` label.
    #[error("category #{index} has no 'category' label")]
    MissingCategoryName {
        /// Zero-based position of the category record.
        index: usize,
    },

    /// A category record's label is a list or mapping instead of a scalar.
    #[error("category #{index} has a 'category' label that is not a string")]
    InvalidCategoryName {
        /// Zero-based position of the category record.
        index: usize,
    },

    /// A structural element has the wrong type (e.g. `fields` is not a list).
    #[error("invalid schema shape at {location}: expected {expected}")]
    InvalidShape {
        /// Where in the schema the problem was found.
        location: String,
        /// What was expected there.
        expected: &'static str,
    },
}

/// Failure to read one document under test.
#[derive(Error, Debug)]
pub enum DocumentReadError {
    /// The named document does not exist.
    #[error("file not found: {}", path.display())]
    NotFound {
        /// Path of the missing document.
        path: PathBuf,
    },

    /// The document exists but could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        /// Path of the document.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON.
    #[error("invalid JSON in {}: {source}", path.display())]
    Parse {
        /// Path of the document.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },
}

impl DocumentReadError {
    /// Path of the document this error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::NotFound { path } | Self::Io { path, .. } | Self::Parse { path, .. } => path,
        }
    }
}
