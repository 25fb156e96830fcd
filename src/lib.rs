// lib.rs - breast tumour diagnosis scoring core
pub mod api;
pub mod common;
pub mod features;
pub mod inference;

pub use api::ffi::{oncoscore_info, oncoscore_init, oncoscore_predict};
pub use common::{AppCfg, ScoreError, ScoreResult};
pub use inference::{Classifier, Diagnosis, InferenceEngine, PredictionResult, PredictionService};
