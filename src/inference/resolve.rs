//! Turns classifier probabilities into a diagnosis and confidence.

use crate::common::error::{ScoreError, ScoreResult};

use super::domain::{Diagnosis, PredictionResult, Score};

/// Allowed drift of the probability sum away from one.
pub const PROBABILITY_TOLERANCE: f64 = 1e-3;

/// Resolve a raw score.
///
/// The class index reported by the classifier is authoritative, ties
/// included. Confidence is the probability of that class as a percentage,
/// rounded half away from zero to two decimals. Probabilities that break the
/// classifier contract are an internal error and are never renormalised.
pub fn resolve(score: &Score) -> ScoreResult<PredictionResult> {
    let probabilities = &score.probabilities;
    if probabilities.len() != 2 {
        return Err(ScoreError::internal(format!(
            "expected 2 class probabilities, got {}",
            probabilities.len()
        )));
    }

    let in_bounds = |p: &f64| {
        p.is_finite() && (-PROBABILITY_TOLERANCE..=1.0 + PROBABILITY_TOLERANCE).contains(p)
    };
    if !probabilities.iter().all(in_bounds) {
        return Err(ScoreError::internal(format!(
            "probabilities out of range: {probabilities:?}"
        )));
    }

    let sum: f64 = probabilities.iter().sum();
    if (sum - 1.0).abs() > PROBABILITY_TOLERANCE {
        return Err(ScoreError::internal(format!(
            "probabilities sum to {sum}, not 1"
        )));
    }

    let diagnosis = Diagnosis::from_class_index(score.class_index).ok_or_else(|| {
        ScoreError::internal(format!("unknown class index {}", score.class_index))
    })?;

    let confidence = percent_2dp(probabilities[score.class_index]).clamp(0.0, 100.0);

    Ok(PredictionResult {
        diagnosis,
        confidence,
        class_index: diagnosis.class_index(),
    })
}

/// `probability * 100` rounded half away from zero to two decimals.
///
/// Works on the shortest decimal rendering of the probability, so a value
/// written as `0.00145` rounds as the decimal half it is rather than as the
/// binary value just below it.
fn percent_2dp(probability: f64) -> f64 {
    // Display never switches to exponent notation for f64.
    let repr = probability.abs().to_string();
    let (int, frac) = repr.split_once('.').unwrap_or((repr.as_str(), ""));
    let frac = frac.as_bytes();

    // Probability scaled to units of 1e-4, i.e. hundredths of a percent.
    let digits = int
        .bytes()
        .chain((0..4).map(|i| frac.get(i).copied().unwrap_or(b'0')));
    let mut hundredths = digits.fold(0u64, |acc, d| acc * 10 + u64::from(d - b'0'));
    if frac.get(4).is_some_and(|d| *d >= b'5') {
        hundredths += 1;
    }

    let percent = hundredths as f64 / 100.0;
    if probability < 0.0 {
        -percent
    } else {
        percent
    }
}
