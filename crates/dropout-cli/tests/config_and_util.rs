//! Integration tests for CLI config parsing and util helpers.

use std::path::PathBuf;

use dropout_cli::predict::input::{CohortMode, PredictConfig};
use dropout_cli::predict::run::build_input;
use dropout_cli::util::{validate_table_path, write_text_file};
use dropout_classifiers::Field;

// ---------------------------------------------------------------------------
// validate_table_path
// ---------------------------------------------------------------------------

#[test]
fn validate_tsv_file_exists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.tsv");
    std::fs::File::create(&path).unwrap();
    assert!(validate_table_path(path.to_str().unwrap()).is_ok());
}

#[test]
fn validate_csv_file_exists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.CSV");
    std::fs::File::create(&path).unwrap();
    assert!(validate_table_path(path.to_str().unwrap()).is_ok());
}

#[test]
fn validate_wrong_extension_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.txt");
    std::fs::File::create(&path).unwrap();
    assert!(validate_table_path(path.to_str().unwrap()).is_err());
}

#[test]
fn validate_nonexistent_file_errors() {
    assert!(validate_table_path("/nonexistent/path/data.tsv").is_err());
}

#[test]
fn write_text_file_creates_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("report.html");
    write_text_file(&path, "<html></html>").unwrap();
    assert_eq!(std::fs::read_to_string(path).unwrap(), "<html></html>");
}

// ---------------------------------------------------------------------------
// PredictConfig
// ---------------------------------------------------------------------------

#[test]
fn predict_config_default_values() {
    let cfg = PredictConfig::default();
    assert_eq!(cfg.cohort, CohortMode::Auto);
    assert!(cfg.values.is_empty());
    assert!(cfg.report_file.is_none());
    assert!(cfg.output_file.ends_with(".csv"));
}

#[test]
fn predict_config_round_trips_json() {
    let cfg = PredictConfig::default();
    let json = serde_json::to_string(&cfg).unwrap();
    let cfg2: PredictConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(cfg.artifacts, cfg2.artifacts);
    assert_eq!(cfg.output_file, cfg2.output_file);
}

#[test]
fn partial_config_keeps_defaults_and_resolves_paths() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{
            "artifacts": {
                "scaler": "models/scaler.json",
                "domestic": { "path": "/abs/domestic.json" },
                "international": { "path": "models/intl.txt", "model": { "kind": "gbdt", "format": "xgboost_dump" } }
            },
            "cohort": "not-a-mode",
            "values": ["Age=30"]
        }"#,
    )
    .unwrap();

    let cfg = PredictConfig::from_file(&path).unwrap();
    assert_eq!(cfg.artifacts.scaler, dir.path().join("models/scaler.json"));
    assert_eq!(cfg.artifacts.domestic.path, PathBuf::from("/abs/domestic.json"));
    assert_eq!(
        cfg.artifacts.international.path,
        dir.path().join("models/intl.txt")
    );
    // invalid value falls back to the default
    assert_eq!(cfg.cohort, CohortMode::Auto);
    assert_eq!(cfg.values, vec!["Age=30".to_string()]);
    assert_eq!(cfg.output_file, PredictConfig::default().output_file);
}

#[test]
fn unreadable_config_errors() {
    assert!(PredictConfig::from_file(&PathBuf::from("/nonexistent/config.json")).is_err());
}

#[test]
fn cohort_mode_parses() {
    assert_eq!("Compare".parse::<CohortMode>().unwrap(), CohortMode::Compare);
    assert_eq!("domestic".parse::<CohortMode>().unwrap(), CohortMode::Domestic);
    assert!("everyone".parse::<CohortMode>().is_err());
}

// ---------------------------------------------------------------------------
// Input assembly
// ---------------------------------------------------------------------------

#[test]
fn build_input_applies_overrides_on_defaults() {
    let cfg = PredictConfig {
        values: vec!["Nationality=10".into(), "Unemployment=16.2".into()],
        ..PredictConfig::default()
    };
    let input = build_input(&cfg).unwrap();
    assert_eq!(input.nationality(), 10);
    assert_eq!(input.get(Field::Unemployment), 16.2);
    assert_eq!(input.get(Field::Age), 23.0);
}

#[test]
fn build_input_rejects_bad_override() {
    let cfg = PredictConfig {
        values: vec!["Scholarship=3".into()],
        ..PredictConfig::default()
    };
    let err = build_input(&cfg).unwrap_err();
    assert!(format!("{:#}", err).contains("Scholarship"));
}
