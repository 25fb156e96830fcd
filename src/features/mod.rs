//! Feature domain: schema, request validation and vector assembly.

pub mod domain;
pub mod service;

pub use domain::{feature_names, FeatureSpec, FeatureVector, FEATURE_COUNT, FEATURE_SCHEMA};
