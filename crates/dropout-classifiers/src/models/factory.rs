use anyhow::{Context, Result};

use crate::config::{ClassifierArtifact, ModelType};
use crate::models::classifier_trait::ClassifierModel;
use crate::models::gbdt::GbdtClassifier;
use crate::models::logistic::LogisticClassifier;

/// Load a boxed classifier from its artifact description.
pub fn build_model(artifact: &ClassifierArtifact) -> Result<Box<dyn ClassifierModel>> {
    let model: Box<dyn ClassifierModel> = match &artifact.model {
        ModelType::Logistic => Box::new(LogisticClassifier::from_json_file(&artifact.path)?),
        ModelType::Gbdt {
            format,
            classes,
            threshold,
        } => Box::new(
            GbdtClassifier::load(&artifact.path, *format, *classes, *threshold)
                .with_context(|| format!("Failed to build GBDT classifier from {}", artifact.path.display()))?,
        ),
    };
    log::debug!(
        "Built {} classifier from {}",
        model.name(),
        artifact.path.display()
    );
    Ok(model)
}
