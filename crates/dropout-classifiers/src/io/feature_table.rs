//! CSV/TSV tables of student features and their predictions.
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use csv::StringRecord;
use rayon::prelude::*;

use crate::error::PredictionError;
use crate::features::{FeatureVector, FeatureVectorBuilder, Field, FEATURE_COUNT};
use crate::outcome::PredictionResult;
use crate::pipeline::PredictionContext;

/// One data row of a feature table.
#[derive(Debug, Clone)]
pub struct FeatureRow {
    /// 1-based data row number (header excluded).
    pub row: usize,
    /// Raw cell text in canonical field order, echoed back on output.
    pub raw: Vec<String>,
    pub parsed: Result<FeatureVector, PredictionError>,
}

fn delimiter_for(path: &Path) -> u8 {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("tsv") => b'\t',
        _ => b',',
    }
}

fn find_column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|header| header.trim().eq_ignore_ascii_case(name))
}

/// Read a feature table. Columns are matched by field name in any order;
/// extra columns are ignored. Invalid cell values fail only their own row.
pub fn read_feature_table<P: AsRef<Path>>(path: P) -> Result<Vec<FeatureRow>> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter_for(path))
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Failed to open feature table: {}", path.display()))?;

    let headers = reader
        .headers()
        .context("Failed to read feature table header row")?
        .clone();

    let mut column_of = [0usize; FEATURE_COUNT];
    for field in Field::ALL {
        column_of[field.index()] = find_column(&headers, field.name())
            .ok_or_else(|| anyhow!("Missing feature column '{}'", field.name()))?;
    }

    let mut rows = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read row {}", row_idx + 1))?;

        let raw: Vec<String> = column_of
            .iter()
            .map(|&idx| record.get(idx).unwrap_or("").to_string())
            .collect();

        rows.push(FeatureRow {
            row: row_idx + 1,
            parsed: parse_row(&raw),
            raw,
        });
    }

    log::info!(
        "Read {} rows from {} ({} invalid)",
        rows.len(),
        path.display(),
        rows.iter().filter(|r| r.parsed.is_err()).count()
    );
    Ok(rows)
}

fn parse_row(raw: &[String]) -> Result<FeatureVector, PredictionError> {
    let mut builder = FeatureVectorBuilder::new();
    for (field, cell) in Field::ALL.iter().zip(raw) {
        let value = cell.parse::<f64>().map_err(|_| {
            PredictionError::invalid_field(field.name(), f64::NAN, format!("'{}' is not a number", cell))
        })?;
        builder.set(*field, value);
    }
    builder.build()
}

/// Predict every parsed row in parallel, passing row errors through.
pub fn score_rows(
    context: &PredictionContext,
    rows: &[FeatureRow],
) -> Vec<Result<PredictionResult, PredictionError>> {
    rows.par_iter()
        .map(|row| match &row.parsed {
            Ok(vector) => context.predict(vector),
            Err(e) => Err(e.clone()),
        })
        .collect()
}

/// Write inputs and predictions side by side; delimiter follows the extension.
pub fn write_predictions<P: AsRef<Path>>(
    path: P,
    rows: &[FeatureRow],
    results: &[Result<PredictionResult, PredictionError>],
) -> Result<()> {
    if rows.len() != results.len() {
        return Err(anyhow!(
            "Have {} rows but {} results",
            rows.len(),
            results.len()
        ));
    }

    let path = path.as_ref();
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter_for(path))
        .from_writer(BufWriter::new(file));

    let mut header: Vec<&str> = vec!["row"];
    header.extend(Field::ALL.iter().map(|f| f.name()));
    header.extend(["cohort", "outcome", "code", "message"]);
    writer.write_record(&header)?;

    for (row, result) in rows.iter().zip(results) {
        let mut record: Vec<String> = Vec::with_capacity(header.len());
        record.push(row.row.to_string());
        record.extend(row.raw.iter().cloned());
        match result {
            Ok(prediction) => {
                record.push(prediction.cohort.to_string());
                record.push(prediction.outcome.to_string());
                record.push(prediction.code.to_string());
                record.push(
                    prediction
                        .warning()
                        .map(|w| w.to_string())
                        .unwrap_or_default(),
                );
            }
            Err(e) => {
                record.extend([String::new(), String::new(), String::new(), e.to_string()]);
            }
        }
        writer.write_record(&record)?;
    }

    writer.flush()?;
    log::info!("Wrote {} predictions to {}", rows.len(), path.display());
    Ok(())
}
