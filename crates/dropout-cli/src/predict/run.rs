use anyhow::{Context, Result};

use dropout_classifiers::io::{read_feature_table, score_rows, write_predictions};
use dropout_classifiers::report::{render_comparison_report, render_prediction_report};
use dropout_classifiers::{Cohort, FeatureVector, FeatureVectorBuilder, PredictionContext};

use crate::predict::input::{CohortMode, PredictConfig};
use crate::predict::output::{format_comparison, format_inputs, format_result};
use crate::util::write_text_file;

/// Counts reported after scoring a table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub predicted: usize,
    pub failed: usize,
    pub unrecognized: usize,
}

/// Form defaults with the configured `Field=value` overrides applied.
pub fn build_input(config: &PredictConfig) -> Result<FeatureVector> {
    let mut builder = FeatureVectorBuilder::with_defaults();
    for assignment in &config.values {
        builder
            .apply_assignment(assignment)
            .with_context(|| format!("Invalid input '{}'", assignment))?;
    }
    Ok(builder.build()?)
}

/// Predict a single student and return the text to print.
pub fn run_predict(config: &PredictConfig) -> Result<String> {
    let input = build_input(config)?;
    let context = PredictionContext::load(&config.artifacts)?;

    let (text, report) = match config.cohort {
        CohortMode::Compare => {
            let comparison = context.compare(&input)?;
            (
                format_comparison(&comparison),
                render_comparison_report(&input, &comparison),
            )
        }
        mode => {
            let result = match mode {
                CohortMode::Domestic => context.predict_as(Cohort::Domestic, &input)?,
                CohortMode::International => context.predict_as(Cohort::International, &input)?,
                _ => context.predict(&input)?,
            };
            log::info!(
                "Predicted {} (code {}) with the {} classifier",
                result.outcome,
                result.code,
                result.cohort
            );
            (format_result(&result), render_prediction_report(&input, &result))
        }
    };

    if let Some(path) = &config.report_file {
        write_text_file(path, &report)?;
        log::info!("Wrote report to {}", path);
    }

    Ok(format!("{}\n{}", text, format_inputs(&input)))
}

/// Score every row of the configured input table and write the results.
pub fn run_batch(config: &PredictConfig) -> Result<BatchSummary> {
    config.validate_batch()?;
    let context = PredictionContext::load(&config.artifacts)?;

    let rows = read_feature_table(&config.input_data)?;
    let results = score_rows(&context, &rows);
    write_predictions(&config.output_file, &rows, &results)?;

    let mut summary = BatchSummary {
        total: results.len(),
        ..Default::default()
    };
    for (row, result) in rows.iter().zip(&results) {
        match result {
            Ok(prediction) => {
                summary.predicted += 1;
                if prediction.warning().is_some() {
                    summary.unrecognized += 1;
                }
            }
            Err(e) => {
                summary.failed += 1;
                log::warn!("Row {}: {}", row.row, e);
            }
        }
    }
    Ok(summary)
}
