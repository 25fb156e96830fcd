//! Transport-agnostic operations behind the `/api/predict` and `/api/info`
//! routes. Every failure is turned into a response here; nothing escapes.

use std::time::Instant;

use log::{debug, error, warn};

use crate::common::error::{ErrorCode, ScoreError};
use crate::inference::PredictionService;

use super::response::{self, ApiResponse};

/// Score a raw request body.
pub fn predict(service: &PredictionService, raw: &str) -> ApiResponse {
    let start = Instant::now();
    let outcome = service.predict_raw(raw);
    let dur_ms = start.elapsed().as_millis();

    match &outcome {
        Ok(result) => debug!(
            "predict code={} diagnosis={} dur_ms={dur_ms}",
            ErrorCode::Ok as u32,
            result.diagnosis.as_str()
        ),
        Err(err @ ScoreError::Internal(detail)) => {
            error!("predict code={} dur_ms={dur_ms}: {detail}", err.code() as u32)
        }
        Err(err) => warn!("predict code={} dur_ms={dur_ms}: {err}", err.code() as u32),
    }

    response::prediction(&outcome)
}

/// Service metadata reflecting the current model state.
pub fn info(service: &PredictionService) -> ApiResponse {
    response::info(service.model_loaded())
}
