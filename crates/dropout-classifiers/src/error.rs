use std::error::Error;
use std::fmt;

/// Errors raised while building, scaling or classifying a feature vector.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionError {
    /// A raw value is missing, out of its declared range, or of the wrong kind.
    InvalidFieldValue {
        field: String,
        value: f64,
        reason: String,
    },
    UnknownField(String),
    FieldCount { expected: usize, found: usize },
    /// The scaler artifact does not describe the 23 canonical fields in order.
    /// `field` names the first out-of-place feature when the counts agree.
    ScalerArityMismatch {
        expected: usize,
        found: usize,
        field: Option<String>,
    },
    InvalidArtifact(String),
    PredictionFailed(String),
}

impl PredictionError {
    pub fn invalid_field(field: impl Into<String>, value: f64, reason: impl Into<String>) -> Self {
        PredictionError::InvalidFieldValue {
            field: field.into(),
            value,
            reason: reason.into(),
        }
    }

    /// Configuration errors are fatal at startup and never caused by user input.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            PredictionError::ScalerArityMismatch { .. } | PredictionError::InvalidArtifact(_)
        )
    }
}

impl fmt::Display for PredictionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PredictionError::InvalidFieldValue {
                field,
                value,
                reason,
            } if value.is_nan() => write!(f, "Invalid value for field '{}': {}", field, reason),
            PredictionError::InvalidFieldValue {
                field,
                value,
                reason,
            } => write!(f, "Invalid value {} for field '{}': {}", value, field, reason),
            PredictionError::UnknownField(name) => write!(f, "Unknown field '{}'", name),
            PredictionError::FieldCount { expected, found } => {
                write!(f, "Expected {} feature values, got {}", expected, found)
            }
            PredictionError::ScalerArityMismatch {
                expected,
                found,
                field: None,
            } => write!(
                f,
                "Scaler parameters describe {} features but the feature vector has {}",
                found, expected
            ),
            PredictionError::ScalerArityMismatch {
                field: Some(name), ..
            } => write!(
                f,
                "Scaler feature order does not match the feature vector (first mismatch: '{}')",
                name
            ),
            PredictionError::InvalidArtifact(reason) => write!(f, "Invalid artifact: {}", reason),
            PredictionError::PredictionFailed(reason) => write!(f, "Prediction failed: {}", reason),
        }
    }
}

impl Error for PredictionError {}
