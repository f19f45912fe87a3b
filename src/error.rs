// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types for each stage of the quoting pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, Error>;

/// Structural problems with a mesh handed over by an importer
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshError {
    #[error("face {face} references vertex {index}, but the mesh has only {vertex_count} vertices")]
    IndexOutOfRange {
        face: usize,
        index: usize,
        vertex_count: usize,
    },

    #[error("vertex {index} has a non-finite coordinate")]
    NonFiniteVertex { index: usize },
}

/// Fatal analysis failures. No partial statistics are produced.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("invalid geometry: {reason}")]
    InvalidGeometry { reason: String },
}

/// A single derived metric that could not be computed.
///
/// Recovered inside the analyzer: the metric is replaced by its documented
/// default and a warning is logged.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("{metric} not computable: {reason}")]
pub struct DegenerateMetric {
    pub metric: &'static str,
    pub reason: String,
}

impl DegenerateMetric {
    pub fn new(metric: &'static str, reason: impl Into<String>) -> Self {
        Self {
            metric,
            reason: reason.into(),
        }
    }
}

/// Mesh import failures
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("unsupported format `{extension}` for {path:?} (supported: {supported})")]
    UnsupportedFormat {
        path: PathBuf,
        extension: String,
        supported: String,
    },

    #[error("failed to import {path:?}: {reason}")]
    ImportFailed { path: PathBuf, reason: String },

    #[error("failed to read {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Fatal pricing failures
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PricingError {
    #[error("invalid pricing input `{field}`: {reason}")]
    InvalidPricingInput { field: String, reason: String },
}

impl PricingError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPricingInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Configuration and catalog file failures
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to write {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize configuration")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid value `{value}` for `{key}`")]
    InvalidValue { key: String, value: String },
}

/// Top-level error for callers driving the whole pipeline
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Mesh(#[from] MeshError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = MeshError::IndexOutOfRange {
            face: 3,
            index: 9,
            vertex_count: 8,
        };
        assert_eq!(
            err.to_string(),
            "face 3 references vertex 9, but the mesh has only 8 vertices"
        );

        let err = PricingError::invalid("quantity", "not a number");
        assert_eq!(err.to_string(), "invalid pricing input `quantity`: not a number");
    }

    #[test]
    fn test_error_conversion() {
        let err: Error = AnalysisError::InvalidGeometry {
            reason: "mesh has no faces".into(),
        }
        .into();
        assert!(matches!(err, Error::Analysis(_)));
        assert_eq!(err.to_string(), "invalid geometry: mesh has no faces");
    }
}
