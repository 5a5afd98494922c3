use std::fmt;

use serde::{Deserialize, Serialize};

/// Which student population, and therefore which classifier, a prediction uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cohort {
    Domestic,
    International,
}

impl Cohort {
    pub const ALL: [Cohort; 2] = [Cohort::Domestic, Cohort::International];

    pub fn label(&self) -> &'static str {
        match self {
            Cohort::Domestic => "Domestic",
            Cohort::International => "International",
        }
    }
}

impl fmt::Display for Cohort {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Cohort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "domestic" => Ok(Cohort::Domestic),
            "international" => Ok(Cohort::International),
            _ => Err(format!("Unknown cohort: {}", s)),
        }
    }
}

/// Class code returned by a classifier, read as a student outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Dropout,
    Graduated,
    Unrecognized(i64),
}

impl Outcome {
    pub const DROPOUT_CODE: i64 = 1;
    pub const GRADUATED_CODE: i64 = 0;

    pub fn from_code(code: i64) -> Self {
        match code {
            Self::DROPOUT_CODE => Outcome::Dropout,
            Self::GRADUATED_CODE => Outcome::Graduated,
            other => Outcome::Unrecognized(other),
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Outcome::Unrecognized(_))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Outcome::Dropout => f.write_str("Dropout"),
            Outcome::Graduated => f.write_str("Graduated"),
            Outcome::Unrecognized(code) => write!(f, "Unrecognized({})", code),
        }
    }
}

/// Non-fatal conditions attached to an otherwise successful prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionWarning {
    /// The classifier returned a code that is neither 0 nor 1.
    UnrecognizedOutputCode(i64),
}

impl fmt::Display for PredictionWarning {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PredictionWarning::UnrecognizedOutputCode(code) => {
                write!(f, "Prediction result exceeds expected range: {}", code)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub outcome: Outcome,
    pub code: i64,
    pub cohort: Cohort,
}

impl PredictionResult {
    pub fn new(cohort: Cohort, code: i64) -> Self {
        PredictionResult {
            outcome: Outcome::from_code(code),
            code,
            cohort,
        }
    }

    pub fn warning(&self) -> Option<PredictionWarning> {
        match self.outcome {
            Outcome::Unrecognized(code) => Some(PredictionWarning::UnrecognizedOutputCode(code)),
            _ => None,
        }
    }
}
