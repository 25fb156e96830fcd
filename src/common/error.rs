//! Error handling primitives shared across the core.
//!
//! Three kinds of failure reach callers: bad input, a missing model and
//! internal contract violations. Artefact load problems stay at startup and
//! only ever surface per request as [`ScoreError::ModelUnavailable`].

use std::path::PathBuf;

use thiserror::Error;

/// Stable error codes that cross the FFI boundary and appear in log lines.
#[repr(u32)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorCode {
    /// Success code used as a sentinel.
    Ok = 0,
    /// Input failed validation.
    InvalidInput = 1,
    /// Model artefact was not loaded.
    ModelMissing = 2,
    /// Contract violations and bugs.
    Internal = 3,
}

/// Reasons a prediction request body is rejected.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("request body is not valid JSON: {0}")]
    MalformedBody(String),
    #[error("missing \"features\" field")]
    MissingFeatures,
    #[error("\"features\" is not an array")]
    NotASequence,
    #[error("expected {expected} features, got {got}")]
    WrongLength { expected: usize, got: usize },
    #[error("element {index} ({name}) is not a finite number")]
    NonNumeric { index: usize, name: &'static str },
}

/// Failures while loading a classifier artefact from disk.
#[derive(Debug, Error)]
pub enum ArtefactError {
    #[error("cannot read model artefact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse model artefact {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("model expects {got} features, schema defines {expected}")]
    FeatureCount { expected: usize, got: usize },
    #[error("model feature {index} is {got:?}, schema expects {expected:?}")]
    FeatureOrder {
        index: usize,
        expected: &'static str,
        got: String,
    },
    #[error("malformed model artefact: {0}")]
    Malformed(String),
}

/// Canonical error type for the scoring pipeline.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ScoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("model not ready")]
    ModelUnavailable,
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result alias used throughout the crate.
pub type ScoreResult<T> = Result<T, ScoreError>;

impl ScoreError {
    /// Internal error helper.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Machine parsable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ScoreError::Validation(_) => ErrorCode::InvalidInput,
            ScoreError::ModelUnavailable => ErrorCode::ModelMissing,
            ScoreError::Internal(_) => ErrorCode::Internal,
        }
    }
}
