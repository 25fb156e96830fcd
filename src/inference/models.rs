//! Classifier families that can be exported by the training pipeline.
//!
//! Only the artefact loader and the evaluators below know about these shapes;
//! the rest of the pipeline sees a [`Classifier`].

use std::sync::Arc;

use serde::Deserialize;

use crate::common::error::{ArtefactError, ScoreError, ScoreResult};
use crate::features::{FEATURE_COUNT, FEATURE_SCHEMA};

use super::domain::Classifier;

const CLASS_COUNT: usize = 2;

/// Serialized model artefact, discriminated by its `kind` field.
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Artefact {
    RandomForest(RandomForest),
    LogisticRegression(LogisticRegression),
}

impl Artefact {
    /// Check the artefact against the feature schema and its own structure.
    pub fn into_classifier(self) -> Result<Arc<dyn Classifier>, ArtefactError> {
        match self {
            Artefact::RandomForest(forest) => {
                forest.check()?;
                Ok(Arc::new(forest))
            }
            Artefact::LogisticRegression(model) => {
                model.check()?;
                Ok(Arc::new(model))
            }
        }
    }
}

fn check_schema(n_features: usize, names: Option<&[String]>) -> Result<(), ArtefactError> {
    if n_features != FEATURE_COUNT {
        return Err(ArtefactError::FeatureCount {
            expected: FEATURE_COUNT,
            got: n_features,
        });
    }
    let Some(names) = names else {
        return Ok(());
    };
    if names.len() != FEATURE_COUNT {
        return Err(ArtefactError::FeatureCount {
            expected: FEATURE_COUNT,
            got: names.len(),
        });
    }
    for (spec, got) in FEATURE_SCHEMA.iter().zip(names) {
        if spec.name != got.as_str() {
            return Err(ArtefactError::FeatureOrder {
                index: spec.index,
                expected: spec.name,
                got: got.clone(),
            });
        }
    }
    Ok(())
}

fn check_width(expected: usize, x: &[f64]) -> ScoreResult<()> {
    if x.len() == expected {
        Ok(())
    } else {
        Err(ScoreError::internal(format!(
            "input has {} values, model expects {expected}",
            x.len()
        )))
    }
}

/// Averaged ensemble of decision trees.
#[derive(Clone, Debug, Deserialize)]
pub struct RandomForest {
    pub n_features: usize,
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    pub trees: Vec<Tree>,
}

/// Decision tree stored in pre-order; node 0 is the root.
#[derive(Clone, Debug, Deserialize)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        /// Per-class weights, e.g. training sample counts.
        value: Vec<f64>,
    },
}

impl RandomForest {
    fn check(&self) -> Result<(), ArtefactError> {
        check_schema(self.n_features, self.feature_names.as_deref())?;
        if self.trees.is_empty() {
            return Err(ArtefactError::Malformed("forest has no trees".into()));
        }
        for (t, tree) in self.trees.iter().enumerate() {
            tree.check(self.n_features)
                .map_err(|msg| ArtefactError::Malformed(format!("tree {t}: {msg}")))?;
        }
        Ok(())
    }
}

impl Tree {
    fn check(&self, n_features: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("no nodes".into());
        }
        let len = self.nodes.len();
        for (idx, node) in self.nodes.iter().enumerate() {
            match node {
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= n_features {
                        return Err(format!("node {idx} splits on feature {feature}"));
                    }
                    if !threshold.is_finite() {
                        return Err(format!("node {idx} has a non-finite threshold"));
                    }
                    // Children must point forward so traversal always terminates.
                    for child in [*left, *right] {
                        if child <= idx || child >= len {
                            return Err(format!("node {idx} has invalid child {child}"));
                        }
                    }
                }
                Node::Leaf { value } => {
                    if value.len() != CLASS_COUNT {
                        return Err(format!("leaf {idx} has {} classes", value.len()));
                    }
                    if value.iter().any(|w| !w.is_finite() || *w < 0.0) {
                        return Err(format!("leaf {idx} has an invalid weight"));
                    }
                    let total = value.iter().sum::<f64>();
                    if total <= 0.0 {
                        return Err(format!("leaf {idx} is empty"));
                    }
                    if !total.is_finite() {
                        return Err(format!("leaf {idx} weights overflow"));
                    }
                }
            }
        }
        Ok(())
    }

    fn leaf(&self, x: &[f64]) -> &[f64] {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => idx = if x[*feature] <= *threshold { *left } else { *right },
                Node::Leaf { value } => return value,
            }
        }
    }
}

impl Classifier for RandomForest {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict_proba(&self, x: &[f64]) -> ScoreResult<Vec<f64>> {
        check_width(self.n_features, x)?;
        let mut proba = vec![0.0; CLASS_COUNT];
        for tree in &self.trees {
            let leaf = tree.leaf(x);
            let total: f64 = leaf.iter().sum();
            for (acc, w) in proba.iter_mut().zip(leaf) {
                *acc += w / total;
            }
        }
        let n = self.trees.len() as f64;
        proba.iter_mut().for_each(|p| *p /= n);
        Ok(proba)
    }
}

/// Binary logistic regression with optional standardisation.
#[derive(Clone, Debug, Deserialize)]
pub struct LogisticRegression {
    pub n_features: usize,
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default)]
    pub scaler: Option<Scaler>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Scaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl LogisticRegression {
    fn check(&self) -> Result<(), ArtefactError> {
        check_schema(self.n_features, self.feature_names.as_deref())?;
        if self.coefficients.len() != self.n_features {
            return Err(ArtefactError::Malformed(format!(
                "{} coefficients for {} features",
                self.coefficients.len(),
                self.n_features
            )));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|w| !w.is_finite()) {
            return Err(ArtefactError::Malformed("non-finite weight".into()));
        }
        if let Some(scaler) = &self.scaler {
            if scaler.mean.len() != self.n_features || scaler.scale.len() != self.n_features {
                return Err(ArtefactError::Malformed("scaler width mismatch".into()));
            }
            if scaler.mean.iter().any(|m| !m.is_finite())
                || scaler.scale.iter().any(|s| !s.is_finite() || *s == 0.0)
            {
                return Err(ArtefactError::Malformed("invalid scaler".into()));
            }
        }
        Ok(())
    }
}

impl Classifier for LogisticRegression {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict_proba(&self, x: &[f64]) -> ScoreResult<Vec<f64>> {
        check_width(self.n_features, x)?;
        let logit = x
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                let z = match &self.scaler {
                    Some(s) => (v - s.mean[i]) / s.scale[i],
                    None => v,
                };
                self.coefficients[i] * z
            })
            .sum::<f64>()
            + self.intercept;
        let p1 = 1.0 / (1.0 + (-logit).exp());
        Ok(vec![1.0 - p1, p1])
    }
}
