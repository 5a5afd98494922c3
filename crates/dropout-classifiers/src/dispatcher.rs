//! Cohort selection and classifier invocation.
//!
//! The model-selection policy is a single inclusive-range test on the raw
//! Nationality code: `1` is a domestic student, `2..=21` an international one.
//! Both classifiers consume the same scaled 23-field layout.
use std::ops::RangeInclusive;

use crate::error::PredictionError;
use crate::features::{FeatureVector, Field};
use crate::models::ClassifierModel;
use crate::outcome::{Cohort, PredictionResult};

pub const DOMESTIC_NATIONALITY: i64 = 1;
pub const INTERNATIONAL_NATIONALITIES: RangeInclusive<i64> = 2..=21;

impl Cohort {
    /// Select the cohort for a raw Nationality code.
    ///
    /// Codes outside `[1, 21]` are rejected rather than coerced.
    pub fn from_nationality(nationality: i64) -> Result<Cohort, PredictionError> {
        if nationality == DOMESTIC_NATIONALITY {
            Ok(Cohort::Domestic)
        } else if INTERNATIONAL_NATIONALITIES.contains(&nationality) {
            Ok(Cohort::International)
        } else {
            Err(PredictionError::invalid_field(
                Field::Nationality.name(),
                nationality as f64,
                "no cohort is defined for this nationality code",
            ))
        }
    }
}

/// Holds one classifier per cohort and routes scaled vectors to them.
pub struct Dispatcher {
    domestic: Box<dyn ClassifierModel>,
    international: Box<dyn ClassifierModel>,
}

impl Dispatcher {
    pub fn new(domestic: Box<dyn ClassifierModel>, international: Box<dyn ClassifierModel>) -> Self {
        Dispatcher {
            domestic,
            international,
        }
    }

    pub fn classifier(&self, cohort: Cohort) -> &dyn ClassifierModel {
        match cohort {
            Cohort::Domestic => self.domestic.as_ref(),
            Cohort::International => self.international.as_ref(),
        }
    }

    /// Route by the raw Nationality code and classify the scaled vector.
    pub fn predict(
        &self,
        scaled: &FeatureVector,
        nationality_raw: i64,
    ) -> Result<PredictionResult, PredictionError> {
        let cohort = Cohort::from_nationality(nationality_raw)?;
        log::debug!(
            "Nationality {} routed to the {} classifier",
            nationality_raw,
            cohort
        );
        self.predict_with(cohort, scaled)
    }

    /// Classify with an explicitly chosen cohort's model.
    pub fn predict_with(
        &self,
        cohort: Cohort,
        scaled: &FeatureVector,
    ) -> Result<PredictionResult, PredictionError> {
        let code = self.classifier(cohort).predict(scaled.as_slice())?;
        let result = PredictionResult::new(cohort, code);
        if let Some(warning) = result.warning() {
            log::warn!("{} classifier: {}", cohort, warning);
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nationality_boundaries() {
        assert_eq!(Cohort::from_nationality(1).unwrap(), Cohort::Domestic);
        assert_eq!(Cohort::from_nationality(2).unwrap(), Cohort::International);
        assert_eq!(Cohort::from_nationality(21).unwrap(), Cohort::International);
        assert!(Cohort::from_nationality(0).is_err());
        assert!(Cohort::from_nationality(22).is_err());
        assert!(Cohort::from_nationality(-3).is_err());
    }

    #[test]
    fn every_international_code_routes_international() {
        for n in 2..=21 {
            assert_eq!(Cohort::from_nationality(n).unwrap(), Cohort::International);
        }
    }
}
