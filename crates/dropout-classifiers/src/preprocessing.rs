//! Pre-fitted standardization of the student feature vector.
//!
//! The scaler is an artifact produced elsewhere (a fitted scikit-learn
//! `StandardScaler` exported to JSON). It is loaded once at startup and only
//! ever read afterwards.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::PredictionError;
use crate::features::{FeatureVector, FEATURE_COUNT, FIELD_SPECS};

/// On-disk layout of a scaler artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerArtifact {
    pub mean: Vec<f64>,
    #[serde(alias = "std")]
    pub scale: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names_in: Option<Vec<String>>,
}

/// Per-feature mean/std standardization with fixed parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct Scaler {
    mean: [f64; FEATURE_COUNT],
    std: [f64; FEATURE_COUNT],
}

impl Scaler {
    /// Stddev at or below this is treated as a constant feature and left unscaled.
    const MIN_STD: f64 = 1e-12;

    pub fn new(mean: &[f64], std: &[f64]) -> Result<Self, PredictionError> {
        for params in [mean, std] {
            if params.len() != FEATURE_COUNT {
                return Err(PredictionError::ScalerArityMismatch {
                    expected: FEATURE_COUNT,
                    found: params.len(),
                    field: None,
                });
            }
        }

        let mut m = [0.0; FEATURE_COUNT];
        let mut s = [1.0; FEATURE_COUNT];
        for i in 0..FEATURE_COUNT {
            if !mean[i].is_finite() || !std[i].is_finite() || std[i] < 0.0 {
                return Err(PredictionError::InvalidArtifact(format!(
                    "scaler parameters for '{}' are not usable (mean {}, std {})",
                    FIELD_SPECS[i].name, mean[i], std[i]
                )));
            }
            m[i] = mean[i];
            s[i] = if std[i] <= Self::MIN_STD { 1.0 } else { std[i] };
        }

        Ok(Scaler { mean: m, std: s })
    }

    pub fn from_artifact(artifact: &ScalerArtifact) -> Result<Self, PredictionError> {
        if let Some(names) = &artifact.feature_names_in {
            check_feature_order(names)?;
        }
        Scaler::new(&artifact.mean, &artifact.scale)
    }

    /// Load a scaler artifact from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read scaler: {}", path.as_ref().display()))?;
        let artifact: ScalerArtifact = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse scaler: {}", path.as_ref().display()))?;
        let scaler = Scaler::from_artifact(&artifact)
            .with_context(|| format!("Unusable scaler: {}", path.as_ref().display()))?;
        log::debug!("Loaded scaler with {} features from {}", FEATURE_COUNT, path.as_ref().display());
        Ok(scaler)
    }

    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    pub fn std(&self) -> &[f64] {
        &self.std
    }

    /// Apply `(x - mean) / std` to every field.
    pub fn standardize(&self, x: &FeatureVector) -> FeatureVector {
        let mut out = [0.0; FEATURE_COUNT];
        for (i, (slot, &v)) in out.iter_mut().zip(x.as_slice()).enumerate() {
            *slot = (v - self.mean[i]) / self.std[i];
        }
        FeatureVector::from_transformed(out)
    }

    pub fn to_artifact(&self) -> ScalerArtifact {
        ScalerArtifact {
            mean: self.mean.to_vec(),
            scale: self.std.to_vec(),
            feature_names_in: Some(FIELD_SPECS.iter().map(|s| s.name.to_string()).collect()),
        }
    }
}

fn check_feature_order(names: &[String]) -> Result<(), PredictionError> {
    if names.len() != FEATURE_COUNT {
        return Err(PredictionError::ScalerArityMismatch {
            expected: FEATURE_COUNT,
            found: names.len(),
            field: None,
        });
    }
    if let Some((name, _)) = names
        .iter()
        .zip(FIELD_SPECS.iter())
        .find(|(name, spec)| !name.eq_ignore_ascii_case(spec.name))
    {
        return Err(PredictionError::ScalerArityMismatch {
            expected: FEATURE_COUNT,
            found: names.len(),
            field: Some(name.clone()),
        });
    }
    Ok(())
}
