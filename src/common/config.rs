//! Runtime configuration loaded from the process environment.

use std::env;
use std::path::PathBuf;

pub const MODEL_PATH_VAR: &str = "ONCOSCORE_MODEL_PATH";
pub const FALLBACK_MODEL_PATH_VAR: &str = "ONCOSCORE_FALLBACK_MODEL_PATH";
pub const LOG_VAR: &str = "ONCOSCORE_LOG";

const DEFAULT_MODEL_PATH: &str = "model/breast_cancer_model.json";
const DEFAULT_FALLBACK_MODEL_PATH: &str = "model.json";
const DEFAULT_LOG_FILTER: &str = "info";

/// Snapshot of configuration values consumed by the core.
#[derive(Clone, Debug, PartialEq)]
pub struct AppCfg {
    /// Artefact tried first at startup.
    pub model_path: PathBuf,
    /// Artefact tried when `model_path` does not exist.
    pub fallback_model_path: Option<PathBuf>,
    /// `env_logger` filter directive.
    pub log_filter: String,
}

impl AppCfg {
    /// Create a configuration snapshot from the process environment.
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a snapshot from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let fallback = env_or(FALLBACK_MODEL_PATH_VAR, DEFAULT_FALLBACK_MODEL_PATH);

        Self {
            model_path: PathBuf::from(env_or(MODEL_PATH_VAR, DEFAULT_MODEL_PATH)),
            fallback_model_path: (!fallback.trim().is_empty()).then(|| PathBuf::from(fallback)),
            log_filter: env_or(LOG_VAR, DEFAULT_LOG_FILTER),
        }
    }

    /// Configuration pinned to a single artefact, without fallback.
    pub fn with_model_path(path: impl Into<PathBuf>) -> Self {
        Self {
            model_path: path.into(),
            fallback_model_path: None,
            ..Self::from_lookup(|_| None)
        }
    }
}

impl Default for AppCfg {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
