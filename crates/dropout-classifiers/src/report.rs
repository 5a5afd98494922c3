//! Standalone HTML page for a single prediction.
use chrono::Local;
use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::features::FeatureVector;
use crate::outcome::{Cohort, Outcome, PredictionResult};
use crate::pipeline::CohortComparison;

pub const REPORT_TITLE: &str = "Warning forecasts of domestic and international student dropouts";

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 2em auto; max-width: 60em; }
h1 { color: darkblue; text-align: center; font-size: 36px; }
h2 { color: blue; font-size: 30px; }
.outcome { font-size: 24px; color: green; }
.warning { font-size: 20px; color: darkorange; }
table { border-collapse: collapse; width: 100%; }
td { border: 1px solid #ccc; padding: 4px 8px; }
footer { margin-top: 2em; color: #666; font-size: 12px; }
"#;

fn outcome_block(result: &PredictionResult) -> Markup {
    html! {
        h2 { (result.cohort) " students result:" }
        @match result.outcome {
            Outcome::Dropout | Outcome::Graduated => {
                p class="outcome" { "Predicted outcome: " (result.outcome) }
            }
            Outcome::Unrecognized(_) => {
                @if let Some(warning) = result.warning() {
                    p class="warning" { (warning) }
                }
            }
        }
    }
}

/// Inputs echoed two per row as `Name: value`.
fn input_table(input: &FeatureVector) -> Markup {
    let cells: Vec<String> = input
        .iter()
        .map(|(field, value)| format!("{}: {}", field.name(), field.spec().format_value(value)))
        .collect();

    html! {
        table {
            @for pair in cells.chunks(2) {
                tr {
                    @for cell in pair {
                        td { (cell) }
                    }
                    @if pair.len() == 1 {
                        td {}
                    }
                }
            }
        }
    }
}

fn page(body: Markup) -> String {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { (REPORT_TITLE) }
                style { (PreEscaped(STYLE)) }
            }
            body {
                h1 { (REPORT_TITLE) }
                (body)
                footer { "Generated " (Local::now().format("%Y-%m-%d %H:%M:%S")) }
            }
        }
    }
    .into_string()
}

pub fn render_prediction_report(input: &FeatureVector, result: &PredictionResult) -> String {
    page(html! {
        (outcome_block(result))
        (input_table(input))
    })
}

/// Both cohorts' results next to each other, routed cohort first.
pub fn render_comparison_report(input: &FeatureVector, comparison: &CohortComparison) -> String {
    let (first, second) = match comparison.routed {
        Cohort::Domestic => (&comparison.domestic, &comparison.international),
        Cohort::International => (&comparison.international, &comparison.domestic),
    };
    page(html! {
        (outcome_block(first))
        (outcome_block(second))
        (input_table(input))
    })
}
