//! dropout-classifiers: domestic/international student dropout forecasting.
//!
//! A fixed 23-field student feature vector is validated, standardized with a
//! pre-fitted scaler and handed to one of two pre-trained binary classifiers,
//! chosen by the student's Nationality code. Artifacts are loaded once into a
//! `PredictionContext` and shared read-only afterwards.
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod features;
pub mod io;
pub mod models;
pub mod outcome;
pub mod pipeline;
pub mod preprocessing;
pub mod report;

pub use error::PredictionError;
pub use features::{FeatureVector, FeatureVectorBuilder, Field, FEATURE_COUNT};
pub use outcome::{Cohort, Outcome, PredictionResult, PredictionWarning};
pub use pipeline::PredictionContext;
