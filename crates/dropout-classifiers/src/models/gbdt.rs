use std::path::Path;

use anyhow::{anyhow, Result};
use gbdt::decision_tree::{Data, DataVec};
use gbdt::gradient_boost::GBDT;

use crate::config::GbdtFormat;
use crate::error::PredictionError;
use crate::features::FEATURE_COUNT;
use crate::models::classifier_trait::ClassifierModel;

/// Gradient Boosting Decision Tree (GBDT) classifier loaded from a saved model.
pub struct GbdtClassifier {
    model: GBDT,
    n_features: usize,
    classes: [i64; 2],
    threshold: f32,
}

impl GbdtClassifier {
    pub fn new(model: GBDT, classes: [i64; 2], threshold: f32) -> Self {
        GbdtClassifier {
            model,
            n_features: FEATURE_COUNT,
            classes,
            threshold,
        }
    }

    pub fn load<P: AsRef<Path>>(
        path: P,
        format: GbdtFormat,
        classes: [i64; 2],
        threshold: f32,
    ) -> Result<Self> {
        let path = path.as_ref();
        let path_str = path
            .to_str()
            .ok_or_else(|| anyhow!("Model path is not valid UTF-8: {}", path.display()))?;

        let model = match format {
            GbdtFormat::Native => GBDT::load_model(path_str),
            GbdtFormat::XgboostDump => GBDT::from_xgboost_dump(path_str, "binary:logistic"),
        }
        .map_err(|e| anyhow!("Failed to load GBDT model {}: {}", path.display(), e))?;

        if !(threshold > 0.0 && threshold < 1.0) {
            return Err(PredictionError::InvalidArtifact(format!(
                "decision threshold {} must lie strictly between 0 and 1",
                threshold
            ))
            .into());
        }

        Ok(GbdtClassifier::new(model, classes, threshold))
    }

    /// Probability of the positive class for one row.
    pub fn predict_proba(&self, x: &[f64]) -> Result<f32, PredictionError> {
        if x.len() != self.n_features {
            return Err(PredictionError::PredictionFailed(format!(
                "GBDT model expects {} features, got {}",
                self.n_features,
                x.len()
            )));
        }
        let row: Vec<f32> = x.iter().map(|&v| v as f32).collect();
        let mut test_x = DataVec::new();
        test_x.push(Data::new_test_data(row, None));

        let predictions = self.model.predict(&test_x);
        let p = predictions.first().copied().ok_or_else(|| {
            PredictionError::PredictionFailed("GBDT model returned no prediction".to_string())
        })?;
        if p.is_nan() {
            return Err(PredictionError::PredictionFailed(
                "GBDT model produced NaN".to_string(),
            ));
        }
        Ok(p)
    }
}

impl ClassifierModel for GbdtClassifier {
    fn predict(&self, x: &[f64]) -> Result<i64, PredictionError> {
        let p = self.predict_proba(x)?;
        Ok(self.classes[(p > self.threshold) as usize])
    }

    fn name(&self) -> &str {
        "gbdt"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gbdt::config::Config;

    fn train_stump() -> GBDT {
        let mut config = Config::new();
        config.set_feature_size(FEATURE_COUNT);
        config.set_shrinkage(0.1);
        config.set_max_depth(3);
        config.set_iterations(50);
        config.set_debug(false);
        config.set_loss("LogLikelyhood");

        // feature 0 separates dropouts (+1) from graduates (-1)
        let mut train_x = DataVec::new();
        for i in 0..16 {
            let mut row = vec![0.0f32; FEATURE_COUNT];
            let label = if i % 2 == 0 { 1.0 } else { -1.0 };
            row[0] = if label > 0.0 { 1.0 } else { -1.0 };
            row[1] = (i % 4) as f32;
            train_x.push(Data::new_training_data(row, 1.0, label, None));
        }

        let mut gbdt = GBDT::new(&config);
        gbdt.fit(&mut train_x);
        gbdt
    }

    #[test]
    fn test_gbdt_classifier_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gbdt_model.json");
        train_stump()
            .save_model(path.to_str().unwrap())
            .expect("failed to save model");

        let classifier = GbdtClassifier::load(&path, GbdtFormat::Native, [0, 1], 0.5).unwrap();

        let mut dropout = vec![0.0; FEATURE_COUNT];
        dropout[0] = 1.0;
        let mut graduate = vec![0.0; FEATURE_COUNT];
        graduate[0] = -1.0;

        assert_eq!(classifier.predict(&dropout).unwrap(), 1);
        assert_eq!(classifier.predict(&graduate).unwrap(), 0);
    }

    #[test]
    fn wrong_width_fails_prediction() {
        let classifier = GbdtClassifier::new(train_stump(), [0, 1], 0.5);
        assert!(matches!(
            classifier.predict(&[0.0; 3]),
            Err(PredictionError::PredictionFailed(_))
        ));
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let result = GbdtClassifier::load("/nonexistent/model.json", GbdtFormat::Native, [0, 1], 0.5);
        assert!(result.is_err());
    }
}
