//! Adapter owning the process-wide classifier handle.
//!
//! The handle is decided once at construction and never changes afterwards.
//! A failed load leaves the engine permanently unavailable instead of
//! aborting startup.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{error, info};

use crate::common::config::AppCfg;
use crate::common::error::{ArtefactError, ScoreError, ScoreResult};
use crate::features::{FeatureVector, FEATURE_COUNT};

use super::domain::{Classifier, Score};
use super::repo_fs::FsModelRepo;

#[derive(Clone, Default)]
pub struct InferenceEngine {
    model: Option<Arc<dyn Classifier>>,
    source: Option<PathBuf>,
}

impl InferenceEngine {
    /// Attempt to load the configured artefact; never fails.
    pub fn load(cfg: &AppCfg) -> Self {
        match FsModelRepo::new(cfg).load() {
            Ok((path, model)) => {
                info!("model loaded from {}", path.display());
                Self {
                    model: Some(model),
                    source: Some(path),
                }
            }
            Err(err) => {
                error!("model unavailable: {err}");
                Self::unavailable()
            }
        }
    }

    /// Wrap an already constructed classifier.
    pub fn with_classifier(model: Arc<dyn Classifier>) -> Result<Self, ArtefactError> {
        if model.n_features() != FEATURE_COUNT {
            return Err(ArtefactError::FeatureCount {
                expected: FEATURE_COUNT,
                got: model.n_features(),
            });
        }
        Ok(Self {
            model: Some(model),
            source: None,
        })
    }

    /// Engine with no model; every score call reports the model as missing.
    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self) -> bool {
        self.model.is_some()
    }

    /// File the model was read from, if it came from disk.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Score one vector. Deterministic; failures are reported, not retried.
    pub fn score_vector(&self, vector: &FeatureVector) -> ScoreResult<Score> {
        let model = self.model.as_ref().ok_or(ScoreError::ModelUnavailable)?;
        model.score(vector.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::service::build_vector;
    use tempfile::TempDir;

    struct Constant {
        width: usize,
        proba: [f64; 2],
    }

    impl Classifier for Constant {
        fn n_features(&self) -> usize {
            self.width
        }

        fn predict_proba(&self, _: &[f64]) -> ScoreResult<Vec<f64>> {
            Ok(self.proba.to_vec())
        }
    }

    fn vector() -> FeatureVector {
        build_vector(&[14.5, 19.2, 91.5, 654.8, 0.096, 0.104, 0.088, 0.181]).unwrap()
    }

    #[test]
    fn unavailable_engine_refuses_to_score() {
        let engine = InferenceEngine::unavailable();
        assert!(!engine.is_loaded());
        assert_eq!(engine.score_vector(&vector()), Err(ScoreError::ModelUnavailable));
    }

    #[test]
    fn missing_artefact_degrades_instead_of_failing() {
        let dir = TempDir::new().unwrap();
        let engine = InferenceEngine::load(&AppCfg::with_model_path(dir.path().join("nope.json")));
        assert!(!engine.is_loaded());
        assert!(engine.source().is_none());
    }

    #[test]
    fn injected_classifier_is_scored() {
        let engine = InferenceEngine::with_classifier(Arc::new(Constant {
            width: 8,
            proba: [0.9525, 0.0475],
        }))
        .unwrap();

        let score = engine.score_vector(&vector()).unwrap();
        assert_eq!(score.class_index, 0);
        assert_eq!(score.probabilities, vec![0.9525, 0.0475]);
    }

    #[test]
    fn width_mismatch_is_caught_at_construction() {
        let result = InferenceEngine::with_classifier(Arc::new(Constant {
            width: 30,
            proba: [0.5, 0.5],
        }));
        assert!(matches!(
            result,
            Err(ArtefactError::FeatureCount {
                expected: 8,
                got: 30
            })
        ));
    }
}
