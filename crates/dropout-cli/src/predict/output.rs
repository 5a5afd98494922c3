use std::fmt::Write;

use dropout_classifiers::features::FIELD_SPECS;
use dropout_classifiers::pipeline::CohortComparison;
use dropout_classifiers::{FeatureVector, Outcome, PredictionResult};

/// Headline and outcome (or warning) for one result.
pub fn format_result(result: &PredictionResult) -> String {
    let mut out = format!("{} students result:\n", result.cohort);
    match result.outcome {
        Outcome::Dropout | Outcome::Graduated => {
            let _ = writeln!(out, "Predicted outcome: {}", result.outcome);
        }
        Outcome::Unrecognized(_) => {
            if let Some(warning) = result.warning() {
                let _ = writeln!(out, "Warning: {}", warning);
            }
        }
    }
    out
}

pub fn format_comparison(comparison: &CohortComparison) -> String {
    let routed = comparison.routed_result();
    let other = if routed.cohort == comparison.domestic.cohort {
        &comparison.international
    } else {
        &comparison.domestic
    };
    format!("{}\n{}", format_result(routed), format_result(other))
}

/// Echo the inputs two per line as `Name: value`.
pub fn format_inputs(input: &FeatureVector) -> String {
    let cells: Vec<String> = input
        .iter()
        .map(|(field, value)| format!("{}: {}", field.name(), field.spec().format_value(value)))
        .collect();

    let width = cells.iter().map(|c| c.len()).max().unwrap_or(0) + 4;
    let mut out = String::new();
    for pair in cells.chunks(2) {
        match pair {
            [left, right] => {
                let _ = writeln!(out, "{:<width$}{}", left, right, width = width);
            }
            [left] => {
                let _ = writeln!(out, "{}", left);
            }
            _ => {}
        }
    }
    out
}

/// The field table: name, label, range, default and kind.
pub fn format_field_table() -> String {
    let mut out = format!(
        "{:<14} {:<30} {:>7} {:>7} {:>8}  {}\n",
        "field", "label", "min", "max", "default", "kind"
    );
    for spec in FIELD_SPECS.iter() {
        let _ = writeln!(
            out,
            "{:<14} {:<30} {:>7} {:>7} {:>8}  {:?}",
            spec.name,
            spec.label,
            spec.min,
            spec.max,
            spec.format_value(spec.default),
            spec.kind
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use dropout_classifiers::Cohort;

    #[test]
    fn result_text() {
        let text = format_result(&PredictionResult::new(Cohort::Domestic, 0));
        assert_eq!(text, "Domestic students result:\nPredicted outcome: Graduated\n");

        let text = format_result(&PredictionResult::new(Cohort::International, 9));
        assert!(text.contains("Prediction result exceeds expected range: 9"));
    }

    #[test]
    fn inputs_two_per_line() {
        let text = format_inputs(&FeatureVector::defaults());
        assert_eq!(text.lines().count(), 12);
        assert!(text.lines().next().unwrap().starts_with("Marital: 1"));
        assert_eq!(text.lines().last().unwrap(), "GDP: 1.00");
    }

    #[test]
    fn field_table_lists_every_field() {
        let table = format_field_table();
        assert_eq!(table.lines().count(), 24);
        assert!(table.contains("Nationality"));
    }
}
