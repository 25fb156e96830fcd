//! Domain definitions for classifiers, scores and diagnoses.

use serde::Serialize;

use crate::common::error::ScoreResult;

/// Opaque probability-producing classifier.
///
/// Implementations must be pure: the same input yields the same output and
/// nothing is mutated, so a single instance can be shared across threads.
pub trait Classifier: Send + Sync {
    /// Width of the input vector the model was trained on.
    fn n_features(&self) -> usize;

    /// One probability per class, indexed by class.
    fn predict_proba(&self, x: &[f64]) -> ScoreResult<Vec<f64>>;

    /// Predicted class and the probabilities it was derived from.
    ///
    /// The default takes the argmax, keeping the lowest class index on ties.
    fn score(&self, x: &[f64]) -> ScoreResult<Score> {
        let probabilities = self.predict_proba(x)?;
        let class_index = argmax(&probabilities);
        Ok(Score {
            class_index,
            probabilities,
        })
    }
}

fn argmax(values: &[f64]) -> usize {
    values
        .iter()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |(best, best_val), (idx, &val)| {
            if val > best_val {
                (idx, val)
            } else {
                (best, best_val)
            }
        })
        .0
}

/// Raw classifier output before label resolution.
#[derive(Clone, Debug, PartialEq)]
pub struct Score {
    pub class_index: usize,
    pub probabilities: Vec<f64>,
}

/// Diagnosis labels, bound to the class indices used at training time.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum Diagnosis {
    Benign,
    Malignant,
}

impl Diagnosis {
    /// Fixed mapping from class index; never inferred from the model.
    pub fn from_class_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Diagnosis::Benign),
            1 => Some(Diagnosis::Malignant),
            _ => None,
        }
    }

    pub fn class_index(&self) -> u8 {
        match self {
            Diagnosis::Benign => 0,
            Diagnosis::Malignant => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Diagnosis::Benign => "Benign",
            Diagnosis::Malignant => "Malignant",
        }
    }
}

/// Final outcome of a single prediction.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PredictionResult {
    pub diagnosis: Diagnosis,
    /// Percentage in `[0, 100]`, two decimals.
    pub confidence: f64,
    pub class_index: u8,
}
