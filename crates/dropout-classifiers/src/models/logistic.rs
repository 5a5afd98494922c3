use std::path::Path;

use anyhow::{Context, Result};
use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};

use crate::config::default_classes;
use crate::error::PredictionError;
use crate::features::FEATURE_COUNT;
use crate::models::classifier_trait::ClassifierModel;

/// JSON export of a fitted binary logistic regression
/// (`coef_[0]`, `intercept_[0]`, `classes_` in scikit-learn terms).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticArtifact {
    pub coef: Vec<f64>,
    pub intercept: f64,
    #[serde(default = "default_classes")]
    pub classes: [i64; 2],
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

fn default_threshold() -> f64 {
    0.5
}

/// Binary logistic regression classifier
#[derive(Debug, Clone)]
pub struct LogisticClassifier {
    coef: Array1<f64>,
    intercept: f64,
    classes: [i64; 2],
    threshold: f64,
}

impl LogisticClassifier {
    pub fn new(coef: Vec<f64>, intercept: f64) -> Self {
        LogisticClassifier {
            coef: Array1::from_vec(coef),
            intercept,
            classes: default_classes(),
            threshold: default_threshold(),
        }
    }

    /// Class codes reported for a negative and a positive decision.
    pub fn with_classes(mut self, classes: [i64; 2]) -> Self {
        self.classes = classes;
        self
    }

    pub fn from_artifact(artifact: LogisticArtifact) -> Result<Self, PredictionError> {
        if artifact.coef.len() != FEATURE_COUNT {
            return Err(PredictionError::InvalidArtifact(format!(
                "logistic model has {} coefficients, expected {}",
                artifact.coef.len(),
                FEATURE_COUNT
            )));
        }
        if !artifact.intercept.is_finite() || artifact.coef.iter().any(|c| !c.is_finite()) {
            return Err(PredictionError::InvalidArtifact(
                "logistic model has non-finite parameters".to_string(),
            ));
        }
        if !(artifact.threshold > 0.0 && artifact.threshold < 1.0) {
            return Err(PredictionError::InvalidArtifact(format!(
                "decision threshold {} must lie strictly between 0 and 1",
                artifact.threshold
            )));
        }
        Ok(LogisticClassifier {
            coef: Array1::from_vec(artifact.coef),
            intercept: artifact.intercept,
            classes: artifact.classes,
            threshold: artifact.threshold,
        })
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read model: {}", path.as_ref().display()))?;
        let artifact: LogisticArtifact = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse model: {}", path.as_ref().display()))?;
        let model = LogisticClassifier::from_artifact(artifact)
            .with_context(|| format!("Unusable model: {}", path.as_ref().display()))?;
        Ok(model)
    }

    /// Signed distance to the separating hyperplane.
    pub fn decision_function(&self, x: &[f64]) -> Result<f64, PredictionError> {
        if x.len() != self.coef.len() {
            return Err(PredictionError::PredictionFailed(format!(
                "logistic model expects {} features, got {}",
                self.coef.len(),
                x.len()
            )));
        }
        Ok(self.coef.dot(&ArrayView1::from(x)) + self.intercept)
    }

    /// Probability of the positive class.
    pub fn predict_proba(&self, x: &[f64]) -> Result<f64, PredictionError> {
        let z = self.decision_function(x)?;
        Ok(1.0 / (1.0 + (-z).exp()))
    }
}

impl ClassifierModel for LogisticClassifier {
    fn predict(&self, x: &[f64]) -> Result<i64, PredictionError> {
        let p = self.predict_proba(x)?;
        if p.is_nan() {
            return Err(PredictionError::PredictionFailed(
                "logistic model produced NaN".to_string(),
            ));
        }
        Ok(self.classes[(p > self.threshold) as usize])
    }

    fn name(&self) -> &str {
        "logistic"
    }
}
