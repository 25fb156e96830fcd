//! Response shaping for the transport layer.
//!
//! A response body is exactly one of prediction, info or error; the untagged
//! enum makes a payload mixing an error with diagnosis fields unrepresentable.

use serde::Serialize;

use crate::common::error::{ScoreError, ValidationError};
use crate::features::{feature_names, FEATURE_COUNT};
use crate::inference::{Diagnosis, PredictionResult};

pub const SERVICE_NAME: &str = "Breast Cancer Prediction API";
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const STATUS_OK: u16 = 200;
pub const STATUS_BAD_REQUEST: u16 = 400;
pub const STATUS_NOT_FOUND: u16 = 404;
pub const STATUS_INTERNAL: u16 = 500;
pub const STATUS_UNAVAILABLE: u16 = 503;

const MSG_INTERNAL: &str = "Internal server error";
const MSG_MODEL_MISSING: &str = "Model not loaded. Please check server configuration.";
const MSG_NOT_FOUND: &str = "Resource not found";

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PredictionBody {
    pub diagnosis: Diagnosis,
    pub confidence: f64,
    pub prediction: u8,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InfoBody {
    pub name: &'static str,
    pub version: &'static str,
    pub features: [&'static str; FEATURE_COUNT],
    pub model_loaded: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Prediction(PredictionBody),
    Info(InfoBody),
    Error(ErrorBody),
}

/// Status code plus body, ready for any transport.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: ResponseBody,
}

impl ApiResponse {
    fn error(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ResponseBody::Error(ErrorBody {
                error: message.into(),
            }),
        }
    }

    /// Serialise the body. Falls back to the generic error body, which
    /// cannot itself fail to serialise.
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.body)
            .unwrap_or_else(|_| format!("{{\"error\":\"{MSG_INTERNAL}\"}}"))
    }
}

/// Shape the outcome of a prediction.
pub fn prediction(outcome: &Result<PredictionResult, ScoreError>) -> ApiResponse {
    match outcome {
        Ok(result) => ApiResponse {
            status: STATUS_OK,
            body: ResponseBody::Prediction(PredictionBody {
                diagnosis: result.diagnosis,
                confidence: result.confidence,
                prediction: result.class_index,
            }),
        },
        Err(err) => error(err),
    }
}

/// Map an error to its caller-facing shape. Internal detail is not exposed.
pub fn error(err: &ScoreError) -> ApiResponse {
    match err {
        ScoreError::Validation(cause) => {
            ApiResponse::error(STATUS_BAD_REQUEST, validation_message(cause))
        }
        ScoreError::ModelUnavailable => ApiResponse::error(STATUS_UNAVAILABLE, MSG_MODEL_MISSING),
        ScoreError::Internal(_) => internal_error(),
    }
}

fn validation_message(cause: &ValidationError) -> String {
    match cause {
        ValidationError::MalformedBody(_) => {
            "Invalid request. Body must be a JSON object.".to_string()
        }
        ValidationError::MissingFeatures => {
            "Invalid request. Expected \"features\" array.".to_string()
        }
        ValidationError::NotASequence => {
            "Invalid request. \"features\" must be an array.".to_string()
        }
        ValidationError::WrongLength { expected, got } => {
            format!("Expected {expected} features, got {got}")
        }
        ValidationError::NonNumeric { .. } => format!("Invalid feature values: {cause}"),
    }
}

/// Static service metadata, rebuilt on every call.
pub fn info(model_loaded: bool) -> ApiResponse {
    ApiResponse {
        status: STATUS_OK,
        body: ResponseBody::Info(InfoBody {
            name: SERVICE_NAME,
            version: SERVICE_VERSION,
            features: feature_names(),
            model_loaded,
        }),
    }
}

pub fn not_found() -> ApiResponse {
    ApiResponse::error(STATUS_NOT_FOUND, MSG_NOT_FOUND)
}

pub fn internal_error() -> ApiResponse {
    ApiResponse::error(STATUS_INTERNAL, MSG_INTERNAL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    fn body(resp: &ApiResponse) -> Value {
        serde_json::from_str(&resp.to_json()).unwrap()
    }

    #[test]
    fn success_has_exactly_the_prediction_fields() {
        let resp = prediction(&Ok(PredictionResult {
            diagnosis: Diagnosis::Benign,
            confidence: 95.25,
            class_index: 0,
        }));
        assert_eq!(resp.status, 200);
        assert_eq!(
            body(&resp),
            json!({ "diagnosis": "Benign", "confidence": 95.25, "prediction": 0 })
        );
    }

    #[test]
    fn validation_errors_are_bad_requests() {
        let resp = prediction(&Err(ValidationError::WrongLength {
            expected: 8,
            got: 5,
        }
        .into()));
        assert_eq!(resp.status, 400);
        assert_eq!(body(&resp), json!({ "error": "Expected 8 features, got 5" }));

        let resp = error(&ValidationError::MissingFeatures.into());
        assert_eq!(
            body(&resp),
            json!({ "error": "Invalid request. Expected \"features\" array." })
        );

        let resp = error(
            &ValidationError::NonNumeric {
                index: 2,
                name: "perimeter_mean",
            }
            .into(),
        );
        assert_eq!(
            body(&resp),
            json!({ "error": "Invalid feature values: element 2 (perimeter_mean) is not a finite number" })
        );
    }

    #[test]
    fn model_missing_is_distinct_from_bad_input() {
        let resp = error(&ScoreError::ModelUnavailable);
        assert_eq!(resp.status, 503);
        assert_eq!(
            body(&resp),
            json!({ "error": "Model not loaded. Please check server configuration." })
        );
    }

    #[test]
    fn internal_detail_is_not_leaked() {
        let resp = error(&ScoreError::internal("probabilities sum to 1.4, not 1"));
        assert_eq!(resp.status, 500);
        assert_eq!(body(&resp), json!({ "error": "Internal server error" }));
    }

    #[test]
    fn info_lists_features_in_order() {
        let resp = info(false);
        assert_eq!(
            body(&resp),
            json!({
                "name": "Breast Cancer Prediction API",
                "version": SERVICE_VERSION,
                "features": [
                    "radius_mean", "texture_mean", "perimeter_mean", "area_mean",
                    "smoothness_mean", "compactness_mean", "concavity_mean", "symmetry_mean"
                ],
                "model_loaded": false,
            })
        );
        assert_eq!(body(&info(true))["model_loaded"], json!(true));
    }

    #[test]
    fn not_found_shape() {
        assert_eq!(not_found().status, 404);
        assert_eq!(body(&not_found()), json!({ "error": "Resource not found" }));
    }
}
