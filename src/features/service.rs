//! Request validation and feature vector assembly.

use log::debug;
use serde_json::Value;

use crate::common::error::{ScoreError, ScoreResult, ValidationError};

use super::domain::{FeatureVector, FEATURE_COUNT, FEATURE_SCHEMA};

/// Parse raw request text into JSON.
pub fn parse_body(raw: &str) -> Result<Value, ValidationError> {
    serde_json::from_str(raw).map_err(|err| ValidationError::MalformedBody(err.to_string()))
}

/// Check a request body and return its feature values in submitted order.
///
/// Extra top-level fields are ignored. Values outside the documented ranges
/// are passed through untouched.
pub fn validate(body: &Value) -> Result<Vec<f64>, ValidationError> {
    let features = body
        .as_object()
        .and_then(|obj| obj.get("features"))
        .ok_or(ValidationError::MissingFeatures)?;

    let items = features.as_array().ok_or(ValidationError::NotASequence)?;
    if items.len() != FEATURE_COUNT {
        return Err(ValidationError::WrongLength {
            expected: FEATURE_COUNT,
            got: items.len(),
        });
    }

    items
        .iter()
        .zip(FEATURE_SCHEMA.iter())
        .map(|(item, spec)| {
            let value = as_finite(item).ok_or(ValidationError::NonNumeric {
                index: spec.index,
                name: spec.name,
            })?;
            if !spec.in_documented_range(value) {
                debug!("{} = {value} outside documented range", spec.name);
            }
            Ok(value)
        })
        .collect()
}

fn as_finite(item: &Value) -> Option<f64> {
    let value = match item {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    value.is_finite().then_some(value)
}

/// Lay validated values out in the order the classifier was trained with.
///
/// Requests already arrive in schema order, so this is positional today. Any
/// future reordering for a retrained model belongs here and nowhere else.
pub fn build_vector(values: &[f64]) -> ScoreResult<FeatureVector> {
    let ordered = <[f64; FEATURE_COUNT]>::try_from(values).map_err(|_| {
        ScoreError::from(ValidationError::WrongLength {
            expected: FEATURE_COUNT,
            got: values.len(),
        })
    })?;
    Ok(FeatureVector::from_ordered(ordered))
}
