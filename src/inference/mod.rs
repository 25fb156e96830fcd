//! Inference domain: classifier seam, artefact loading, scoring and label
//! resolution.

pub mod domain;
pub mod engine;
pub mod models;
pub mod repo_fs;
pub mod resolve;
pub mod service;

pub use domain::{Classifier, Diagnosis, PredictionResult, Score};
pub use engine::InferenceEngine;
pub use service::PredictionService;
