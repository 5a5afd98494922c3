//! CLI binary smoke tests using assert_cmd.
//!
//! These tests exercise the compiled `dropout` binary against small JSON
//! artifacts written to a temporary directory.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;

use dropout_classifiers::features::field_names;
use dropout_classifiers::{FeatureVector, Field, FEATURE_COUNT};

fn cmd() -> Command {
    Command::cargo_bin("dropout").unwrap()
}

fn write_json(path: &Path, value: &serde_json::Value) {
    std::fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

/// Domestic model: dropout when few 2nd-semester courses are approved.
/// International model: always graduates.
fn write_artifacts(dir: &Path) -> PathBuf {
    write_json(
        &dir.join("scaler.json"),
        &json!({
            "mean": FeatureVector::defaults().as_slice(),
            "scale": vec![1.0; FEATURE_COUNT],
        }),
    );
    let mut coef = vec![0.0; FEATURE_COUNT];
    coef[Field::Second.index()] = -3.0;
    write_json(&dir.join("domestic.json"), &json!({ "coef": coef, "intercept": 0.0 }));
    write_json(
        &dir.join("international.json"),
        &json!({ "coef": vec![0.0; FEATURE_COUNT], "intercept": -5.0 }),
    );

    let config = dir.join("config.json");
    write_json(
        &config,
        &json!({
            "artifacts": {
                "scaler": "scaler.json",
                "domestic": { "path": "domestic.json" },
                "international": { "path": "international.json" }
            },
            "output_file": dir.join("out.csv"),
        }),
    );
    config
}

// ---------------------------------------------------------------------------
// Top-level
// ---------------------------------------------------------------------------

#[test]
fn no_args_shows_help() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn help_flag() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("predict"))
        .stdout(predicate::str::contains("batch"));
}

#[test]
fn version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("dropout"));
}

#[test]
fn fields_lists_table() {
    cmd()
        .arg("fields")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nationality"))
        .stdout(predicate::str::contains("Unemployment rate"));
}

#[test]
fn config_prints_template() {
    cmd()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"artifacts\""))
        .stdout(predicate::str::contains("scaler.json"));
}

// ---------------------------------------------------------------------------
// predict
// ---------------------------------------------------------------------------

#[test]
fn predict_requires_config() {
    cmd().arg("predict").assert().failure();
}

#[test]
fn missing_config_prints_template() {
    let dir = tempfile::tempdir().unwrap();
    for subcommand in ["predict", "batch"] {
        cmd()
            .arg(subcommand)
            .arg(dir.path().join("absent.json"))
            .assert()
            .failure()
            .stdout(predicate::str::contains("\"artifacts\""))
            .stdout(predicate::str::contains("scaler.json"))
            .stderr(predicate::str::contains("Config file not found"));
    }
}

#[test]
fn predict_routes_domestic_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_artifacts(dir.path());
    cmd()
        .arg("predict")
        .arg(&config)
        .args(["-s", "Second=0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Domestic students result:"))
        .stdout(predicate::str::contains("Predicted outcome: Dropout"))
        .stdout(predicate::str::contains("Second: 0"));
}

#[test]
fn predict_routes_international_by_nationality() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_artifacts(dir.path());
    cmd()
        .arg("predict")
        .arg(&config)
        .args(["-s", "Nationality=10", "-s", "Second=0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("International students result:"))
        .stdout(predicate::str::contains("Predicted outcome: Graduated"));
}

#[test]
fn predict_rejects_out_of_range_nationality() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_artifacts(dir.path());
    cmd()
        .arg("predict")
        .arg(&config)
        .args(["-s", "Nationality=22"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nationality"));
}

#[test]
fn predict_compare_and_report() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_artifacts(dir.path());
    let report = dir.path().join("report.html");
    cmd()
        .arg("predict")
        .arg(&config)
        .args(["--cohort", "compare", "-s", "Second=0", "--report"])
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::contains("Domestic students result:"))
        .stdout(predicate::str::contains("International students result:"));

    let html = std::fs::read_to_string(report).unwrap();
    assert!(html.contains("Predicted outcome: Dropout"));
    assert!(html.contains("Predicted outcome: Graduated"));
}

// ---------------------------------------------------------------------------
// batch
// ---------------------------------------------------------------------------

#[test]
fn batch_scores_table() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_artifacts(dir.path());

    let header: Vec<&str> = field_names().collect();
    let row = |nationality: f64| -> String {
        FeatureVector::defaults()
            .with(Field::Nationality, nationality)
            .unwrap()
            .iter()
            .map(|(f, v)| f.spec().format_value(v))
            .collect::<Vec<_>>()
            .join(",")
    };
    let input = dir.path().join("students.csv");
    std::fs::write(&input, format!("{}\n{}\n{}\n", header.join(","), row(1.0), row(4.0))).unwrap();
    let output = dir.path().join("scored.csv");

    cmd()
        .arg("batch")
        .arg(&config)
        .arg("-d")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stderr(predicate::str::contains("Scored 2 rows"));

    let written = std::fs::read_to_string(output).unwrap();
    assert_eq!(written.lines().count(), 3);
    assert!(written.contains(",Domestic,"));
    assert!(written.contains(",International,Graduated,0,"));
}

#[test]
fn batch_rejects_wrong_extension() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_artifacts(dir.path());
    let input = dir.path().join("students.txt");
    std::fs::write(&input, "").unwrap();
    cmd()
        .arg("batch")
        .arg(&config)
        .arg("-d")
        .arg(&input)
        .assert()
        .failure();
}
