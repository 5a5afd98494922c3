//! Builder → Scaler → Dispatcher, over artifacts loaded once at startup.
use anyhow::{Context, Result};
use rayon::prelude::*;

use crate::config::ArtifactConfig;
use crate::dispatcher::Dispatcher;
use crate::error::PredictionError;
use crate::features::FeatureVector;
use crate::models::factory::build_model;
use crate::outcome::{Cohort, PredictionResult};
use crate::preprocessing::Scaler;

/// Side-by-side result of both cohort classifiers on the same input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CohortComparison {
    pub domestic: PredictionResult,
    pub international: PredictionResult,
    /// Cohort implied by the input's own Nationality code.
    pub routed: Cohort,
}

impl CohortComparison {
    pub fn routed_result(&self) -> &PredictionResult {
        match self.routed {
            Cohort::Domestic => &self.domestic,
            Cohort::International => &self.international,
        }
    }
}

/// Immutable artifact set shared by every prediction in the process.
pub struct PredictionContext {
    scaler: Scaler,
    dispatcher: Dispatcher,
}

impl PredictionContext {
    pub fn new(scaler: Scaler, dispatcher: Dispatcher) -> Self {
        PredictionContext { scaler, dispatcher }
    }

    /// Load the scaler and both classifiers named in `config`.
    pub fn load(config: &ArtifactConfig) -> Result<Self> {
        log::info!("Loading scaler from {}", config.scaler.display());
        let scaler = Scaler::from_json_file(&config.scaler)?;

        log::info!(
            "Loading domestic classifier from {}",
            config.domestic.path.display()
        );
        let domestic = build_model(&config.domestic).context("Failed to load domestic classifier")?;

        log::info!(
            "Loading international classifier from {}",
            config.international.path.display()
        );
        let international =
            build_model(&config.international).context("Failed to load international classifier")?;

        Ok(PredictionContext::new(
            scaler,
            Dispatcher::new(domestic, international),
        ))
    }

    pub fn scaler(&self) -> &Scaler {
        &self.scaler
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Standardize and classify, routing on the raw Nationality code.
    pub fn predict(&self, raw: &FeatureVector) -> Result<PredictionResult, PredictionError> {
        let scaled = self.scaler.standardize(raw);
        self.dispatcher.predict(&scaled, raw.nationality())
    }

    /// Validate 23 raw values in field order, then predict.
    pub fn predict_values(&self, values: &[f64]) -> Result<PredictionResult, PredictionError> {
        let raw = FeatureVector::from_values(values)?;
        self.predict(&raw)
    }

    /// Classify with the named cohort's model regardless of Nationality.
    pub fn predict_as(
        &self,
        cohort: Cohort,
        raw: &FeatureVector,
    ) -> Result<PredictionResult, PredictionError> {
        let scaled = self.scaler.standardize(raw);
        self.dispatcher.predict_with(cohort, &scaled)
    }

    /// Run both classifiers on the same scaled vector.
    pub fn compare(&self, raw: &FeatureVector) -> Result<CohortComparison, PredictionError> {
        let routed = Cohort::from_nationality(raw.nationality())?;
        let scaled = self.scaler.standardize(raw);
        Ok(CohortComparison {
            domestic: self.dispatcher.predict_with(Cohort::Domestic, &scaled)?,
            international: self.dispatcher.predict_with(Cohort::International, &scaled)?,
            routed,
        })
    }

    /// Predict every row in parallel. Output order matches input order and
    /// each row succeeds or fails on its own.
    pub fn predict_batch(
        &self,
        rows: &[FeatureVector],
    ) -> Vec<Result<PredictionResult, PredictionError>> {
        rows.par_iter().map(|row| self.predict(row)).collect()
    }
}
