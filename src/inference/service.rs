//! Prediction orchestration: validate, build, score, resolve.

use serde_json::Value;

use crate::common::config::AppCfg;
use crate::common::error::ScoreResult;
use crate::features::service::{build_vector, parse_body, validate};

use super::domain::PredictionResult;
use super::engine::InferenceEngine;
use super::resolve::resolve;

/// Stateless prediction pipeline around a single engine.
///
/// Cheap to share: the only state is the engine's read-only model handle.
#[derive(Clone)]
pub struct PredictionService {
    engine: InferenceEngine,
}

impl PredictionService {
    pub fn new(engine: InferenceEngine) -> Self {
        Self { engine }
    }

    /// Startup: attempt the model load and record the outcome.
    pub fn start(cfg: &AppCfg) -> Self {
        Self::new(InferenceEngine::load(cfg))
    }

    pub fn engine(&self) -> &InferenceEngine {
        &self.engine
    }

    pub fn model_loaded(&self) -> bool {
        self.engine.is_loaded()
    }

    /// Run the pipeline on a parsed request body.
    ///
    /// Input is validated before the model is consulted, so a bad request is
    /// reported as such even while the model is unavailable.
    pub fn predict(&self, body: &Value) -> ScoreResult<PredictionResult> {
        let values = validate(body)?;
        let vector = build_vector(&values)?;
        let score = self.engine.score_vector(&vector)?;
        resolve(&score)
    }

    /// Run the pipeline on raw request text.
    pub fn predict_raw(&self, raw: &str) -> ScoreResult<PredictionResult> {
        let body = parse_body(raw)?;
        self.predict(&body)
    }
}
