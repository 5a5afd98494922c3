use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::ArgMatches;
use serde::{Deserialize, Serialize};

use dropout_classifiers::config::ArtifactConfig;

use crate::util::validate_table_path;

/// How the classifier for a single prediction is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CohortMode {
    /// Route by the Nationality field.
    #[default]
    Auto,
    Domestic,
    International,
    /// Run both classifiers and show them side by side.
    Compare,
}

impl FromStr for CohortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(CohortMode::Auto),
            "domestic" => Ok(CohortMode::Domestic),
            "international" => Ok(CohortMode::International),
            "compare" => Ok(CohortMode::Compare),
            _ => Err(format!(
                "Unknown cohort mode: {}. Expected one of: auto, domestic, international, compare",
                s
            )),
        }
    }
}

impl fmt::Display for CohortMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            CohortMode::Auto => "auto",
            CohortMode::Domestic => "domestic",
            CohortMode::International => "international",
            CohortMode::Compare => "compare",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PredictConfig {
    pub version: String,
    pub artifacts: ArtifactConfig,
    pub input_data: String,
    pub output_file: String,
    pub report_file: Option<String>,
    pub cohort: CohortMode,
    /// `Field=value` overrides applied on top of the form defaults.
    pub values: Vec<String>,
}

impl Default for PredictConfig {
    fn default() -> Self {
        PredictConfig {
            version: clap::crate_version!().to_string(),
            artifacts: ArtifactConfig::default(),
            input_data: String::new(),
            output_file: String::from("dropout_predictions.csv"),
            report_file: None,
            cohort: CohortMode::Auto,
            values: Vec::new(),
        }
    }
}

/// `get_one` panics on ids the subcommand does not define, so look up leniently.
fn arg<'a, T: Clone + Send + Sync + 'static>(matches: &'a ArgMatches, id: &str) -> Option<&'a T> {
    matches.try_get_one::<T>(id).ok().flatten()
}

impl PredictConfig {
    pub fn from_arguments(config_path: &PathBuf, matches: &ArgMatches) -> Result<Self> {
        let mut config = PredictConfig::from_file(config_path)?;

        // Apply CLI overrides
        if let Some(values) = matches.try_get_many::<String>("set").ok().flatten() {
            config.values.extend(values.cloned());
        }
        if let Some(cohort) = arg::<String>(matches, "cohort") {
            config.cohort = CohortMode::from_str(cohort).map_err(anyhow::Error::msg)?;
        }
        if let Some(report_file) = arg::<String>(matches, "report_file") {
            config.report_file = Some(report_file.clone());
        }
        if let Some(input_data) = arg::<String>(matches, "input_data") {
            config.input_data = input_data.clone();
        }
        if let Some(output_file) = arg::<String>(matches, "output_file") {
            config.output_file = output_file.clone();
        }

        Ok(config)
    }

    /// Read a config file, keeping defaults for missing or invalid keys.
    /// Relative artifact paths are resolved against the file's directory.
    pub fn from_file(config_path: &PathBuf) -> Result<Self> {
        let config_json = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        let partial: serde_json::Value = serde_json::from_str(&config_json)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;
        let mut config = PredictConfig::default();

        macro_rules! load_or_default {
            ($field:ident) => {
                if let Some(val) = partial.get(stringify!($field)) {
                    if let Ok(parsed) = serde_json::from_value(val.clone()) {
                        config.$field = parsed;
                    } else {
                        log::warn!(
                            "Config Invalid value for '{}', using default: {:?}",
                            stringify!($field), config.$field
                        );
                    }
                } else {
                    log::warn!(
                        "Config Missing field '{}', using default: {:?}",
                        stringify!($field), config.$field
                    );
                }
            };
        }

        load_or_default!(artifacts);
        load_or_default!(input_data);
        load_or_default!(output_file);
        load_or_default!(report_file);
        load_or_default!(cohort);
        load_or_default!(values);

        if let Some(dir) = config_path.parent() {
            config.artifacts.resolve_relative_to(dir);
        }

        Ok(config)
    }

    /// Batch mode needs an existing CSV/TSV input.
    pub fn validate_batch(&self) -> Result<()> {
        validate_table_path(&self.input_data)
    }
}
