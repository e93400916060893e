//! Integration test: load a `fields.yaml` from disk, analyze a directory of
//! research results, and aggregate the run.

use std::path::{Path, PathBuf};

use fieldcov_core::DocumentReadError;
use fieldcov_schema::{CoverageAnalyzer, CoverageReport, FieldSchema, RunSummary};

const FIELDS_YAML: &str = r#"
field_categories:
  - category: basic_info
    fields:
      - name: name
        required: true
        description: Official product name
      - name: vendor
        required: true
      - name: release_date
  - category: technical_features
    fields:
      - name: architecture
        required: true
      - name: context_window
  - category: performance_metrics
    fields:
      - name: benchmarks
      - name: latency_ms
  - category: business_info
    fields:
      - name: pricing
"#;

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn run(schema: &FieldSchema, paths: &[PathBuf]) -> (Vec<CoverageReport>, Vec<DocumentReadError>) {
    let analyzer = CoverageAnalyzer::new(schema);
    let mut reports = Vec::new();
    let mut errors = Vec::new();
    for path in paths {
        match analyzer.analyze_file(path) {
            Ok(report) => reports.push(report),
            Err(e) => errors.push(e),
        }
    }
    (reports, errors)
}

#[test]
fn grouped_and_flat_documents_are_analyzed_alike() {
    let dir = tempfile::tempdir().unwrap();
    let schema_path = write(dir.path(), "fields.yaml", FIELDS_YAML);
    let schema = FieldSchema::load(&schema_path).unwrap();
    assert_eq!(schema.len(), 8);
    assert_eq!(schema.required_count(), 3);

    let grouped = write(
        dir.path(),
        "grouped.json",
        r#"{
            "_source_file": "notes/grouped.md",
            "Basic Info": {"name": "Model A", "vendor": "Acme"},
            "technical_characteristics": {"architecture": "decoder-only"},
            "performance": {"benchmarks": [{"suite": "mmlu", "score": 71.2}]},
            "uncertain": ["latency_ms"]
        }"#,
    );
    let flat = write(
        dir.path(),
        "flat.json",
        r#"{
            "name": "Model A",
            "vendor": "Acme",
            "architecture": "decoder-only",
            "benchmarks": [{"suite": "mmlu", "score": 71.2}]
        }"#,
    );

    let (reports, errors) = run(&schema, &[grouped, flat]);
    assert!(errors.is_empty());
    assert_eq!(reports.len(), 2);

    for report in &reports {
        assert!(report.valid, "{} should pass", report.file);
        assert_eq!(report.covered, 4);
        assert_eq!(report.coverage_rate, 50.0);
        assert_eq!(
            report.missing_optional,
            vec!["context_window", "latency_ms", "pricing", "release_date"]
        );
        assert_eq!(report.extra_fields, vec!["score", "suite"]);
        assert_eq!(report.missing_by_category["performance_metrics"], vec!["latency_ms"]);
    }

    let summary = RunSummary::from_reports(&reports);
    assert_eq!(summary.passed, 2);
    assert_eq!(summary.average_coverage, 50.0);
    assert!(summary.is_success());
}

#[test]
fn missing_required_fails_run_but_unreadable_files_are_isolated() {
    let dir = tempfile::tempdir().unwrap();
    let schema = FieldSchema::from_yaml_str(FIELDS_YAML).unwrap();

    let incomplete = write(
        dir.path(),
        "incomplete.json",
        r#"{"basic_info": {"name": "Model B"}, "pricing": "free"}"#,
    );
    let broken = write(dir.path(), "broken.json", "{\"name\": ");
    let absent = dir.path().join("absent.json");
    let complete = write(
        dir.path(),
        "complete.json",
        r#"{
            "name": "C", "vendor": "V", "release_date": "2024-01-01",
            "architecture": "moe", "context_window": 128000,
            "benchmarks": [], "latency_ms": 40, "pricing": "paid"
        }"#,
    );

    let (reports, errors) = run(&schema, &[incomplete, broken, absent, complete]);
    assert_eq!(reports.len(), 2);
    assert_eq!(errors.len(), 2);
    assert!(matches!(errors[0], DocumentReadError::Parse { .. }));
    assert!(matches!(errors[1], DocumentReadError::NotFound { .. }));

    let incomplete = &reports[0];
    assert!(!incomplete.valid);
    assert_eq!(incomplete.missing_required, vec!["architecture", "vendor"]);

    let complete = &reports[1];
    assert!(complete.valid);
    assert_eq!(complete.coverage_rate, 100.0);
    assert!(complete.extra_fields.is_empty());

    let summary = RunSummary::from_reports(&reports).with_skipped(errors.len());
    assert_eq!(summary.total, 2);
    assert_eq!(summary.passed, 1);
    assert_eq!(summary.skipped, 2);
    assert!(!summary.is_success());
}
