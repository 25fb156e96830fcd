//! Filesystem repository for trained model artefacts.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::common::config::AppCfg;
use crate::common::error::ArtefactError;

use super::domain::Classifier;
use super::models::Artefact;

/// Resolves and reads the configured classifier artefact.
pub struct FsModelRepo {
    primary: PathBuf,
    fallback: Option<PathBuf>,
}

impl FsModelRepo {
    pub fn new(cfg: &AppCfg) -> Self {
        Self {
            primary: cfg.model_path.clone(),
            fallback: cfg.fallback_model_path.clone(),
        }
    }

    /// Path that will be read: the primary when it exists, otherwise an
    /// existing fallback. A primary that exists but is broken is still chosen.
    pub fn locate(&self) -> &Path {
        if self.primary.exists() {
            return self.primary.as_path();
        }
        match &self.fallback {
            Some(fallback) if fallback.exists() => fallback.as_path(),
            _ => self.primary.as_path(),
        }
    }

    /// Read, parse and check the artefact.
    pub fn load(&self) -> Result<(PathBuf, Arc<dyn Classifier>), ArtefactError> {
        let path = self.locate();
        let classifier = read_artefact(path)?.into_classifier()?;
        Ok((path.to_path_buf(), classifier))
    }
}

/// Parse an artefact file without validating it against the schema.
pub fn read_artefact(path: &Path) -> Result<Artefact, ArtefactError> {
    let raw = fs::read_to_string(path).map_err(|source| ArtefactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ArtefactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
