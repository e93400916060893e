//! # fieldcov-cli — Field Coverage Command-Line Interface
//!
//! Provides the `fieldcov` binary, which checks research-output JSON files
//! against the fields declared in `fields.yaml`:
//!
//! ```bash
//! fieldcov                              # fields.yaml + results/*.json
//! fieldcov -f research/fields.yaml -d out
//! fieldcov -j a.json b.json --quiet
//! fieldcov --format json > coverage.json
//! ```
//!
//! ## Exit codes
//!
//! - `0`: every analyzed document has all required fields, or no
//!   documents were found.
//! - `1`: at least one document is missing a required field, or the
//!   schema could not be located or loaded.
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from analysis. Coverage logic lives in
//!   `fieldcov-schema`; this crate only discovers inputs and renders output.
//! - Reports go to stdout; diagnostics go to stderr through `tracing`.

pub mod discover;
pub mod render;
pub mod validate;

use std::path::{Path, PathBuf};

/// Resolve a path that may be relative to the working directory.
pub fn resolve_path(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}
