use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Serialization of a gradient-boosted tree artifact.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GbdtFormat {
    /// JSON written by `gbdt::gradient_boost::GBDT::save_model`.
    #[default]
    Native,
    /// Text dump of an XGBoost `binary:logistic` booster.
    XgboostDump,
}

/// Supported classifier artifact kinds and their decoding parameters.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelType {
    /// Linear model exported as `{coef, intercept, classes}` JSON.
    #[default]
    Logistic,
    Gbdt {
        #[serde(default)]
        format: GbdtFormat,
        #[serde(default = "default_classes")]
        classes: [i64; 2],
        #[serde(default = "default_threshold")]
        threshold: f32,
    },
}

pub(crate) fn default_classes() -> [i64; 2] {
    [0, 1]
}

fn default_threshold() -> f32 {
    0.5
}

impl FromStr for ModelType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "logistic" => Ok(ModelType::Logistic),
            "gbdt" => Ok(ModelType::Gbdt {
                format: GbdtFormat::Native,
                classes: default_classes(),
                threshold: default_threshold(),
            }),
            "xgboost" => Ok(ModelType::Gbdt {
                format: GbdtFormat::XgboostDump,
                classes: default_classes(),
                threshold: default_threshold(),
            }),
            _ => Err(format!(
                "Unknown model type: {}. Expected one of: logistic, gbdt, xgboost",
                s
            )),
        }
    }
}

/// Location and kind of one pre-trained classifier.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ClassifierArtifact {
    pub path: PathBuf,
    #[serde(default)]
    pub model: ModelType,
}

impl ClassifierArtifact {
    pub fn new<P: Into<PathBuf>>(path: P, model: ModelType) -> Self {
        Self {
            path: path.into(),
            model,
        }
    }
}

/// The three artifacts loaded at startup.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ArtifactConfig {
    pub scaler: PathBuf,
    pub domestic: ClassifierArtifact,
    pub international: ClassifierArtifact,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            scaler: PathBuf::from("scaler.json"),
            domestic: ClassifierArtifact::new("domestic_model.json", ModelType::Logistic),
            international: ClassifierArtifact::new("international_model.json", ModelType::Logistic),
        }
    }
}

impl ArtifactConfig {
    /// Resolve relative artifact paths against `base` (usually the config file's directory).
    pub fn resolve_relative_to(&mut self, base: &Path) {
        for path in [
            &mut self.scaler,
            &mut self.domestic.path,
            &mut self.international.path,
        ] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}

/// Load an artifact configuration from a JSON file. Relative paths are
/// resolved against the file's directory.
pub fn load_artifact_config<P: AsRef<Path>>(path: P) -> Result<ArtifactConfig> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
    let mut config: ArtifactConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.as_ref().display()))?;
    if let Some(dir) = path.as_ref().parent() {
        config.resolve_relative_to(dir);
    }
    Ok(config)
}
