use crate::error::PredictionError;

/// A pre-trained binary classifier consumed as a black box.
///
/// Both cohort classifiers take the same 23-field scaled vector and return a
/// single integer class code. Implementations are immutable after loading so
/// one instance can serve concurrent requests.
pub trait ClassifierModel: Send + Sync {
    /// Predict the class code for one scaled feature row.
    fn predict(&self, x: &[f64]) -> Result<i64, PredictionError>;

    /// Optional human readable name for the model
    fn name(&self) -> &str {
        "classifier"
    }
}
