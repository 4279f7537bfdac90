// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use thiserror::Error;

/// Problems found while validating a parsed configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// `k` must select at least one neighbor
    InvalidNeighborCount { k: u32 },
    /// `p` must request at least one realization
    InvalidEnsembleSize { p: u32 },
    /// A model year outside the four-digit calendar range
    InvalidModelYear { year: i32 },
    /// A numeric parameter that must be strictly positive
    NonPositiveParameter { field: &'static str, value: f64 },
    /// A required string or list is empty
    EmptyField { field: &'static str },
    /// A method identifier outside RAW, EUC, MAH, MSN, GNN
    UnknownOrdinationMethod { method: String },
    /// The same method is listed twice
    DuplicateOrdinationMethod { method: String },
    /// No covariate source of any kind is configured
    NoCovariates,
    /// A covariate source has an empty output name
    EmptyCovariateName { group: &'static str },
    /// A covariate source points at an empty collection or image id
    EmptySourceReference { group: &'static str, name: String },
    /// Two sources (or a source and a location band) share an output band name
    DuplicateBandName { name: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidNeighborCount { k } => {
                write!(f, "k must be at least 1, got {}", k)
            }
            ValidationError::InvalidEnsembleSize { p } => {
                write!(f, "p must be at least 1, got {}", p)
            }
            ValidationError::InvalidModelYear { year } => {
                write!(f, "Model year {} is outside 1..=9999", year)
            }
            ValidationError::NonPositiveParameter { field, value } => {
                write!(f, "'{}' must be greater than zero, got {}", field, value)
            }
            ValidationError::EmptyField { field } => {
                write!(f, "Required field '{}' is empty", field)
            }
            ValidationError::UnknownOrdinationMethod { method } => {
                write!(
                    f,
                    "Unknown ordination method '{}' (expected one of RAW, EUC, MAH, MSN, GNN)",
                    method
                )
            }
            ValidationError::DuplicateOrdinationMethod { method } => {
                write!(f, "Ordination method '{}' is listed more than once", method)
            }
            ValidationError::NoCovariates => {
                write!(f, "No covariate sources are configured")
            }
            ValidationError::EmptyCovariateName { group } => {
                write!(f, "A covariate in '{}' has an empty name", group)
            }
            ValidationError::EmptySourceReference { group, name } => {
                write!(
                    f,
                    "Covariate '{}' in '{}' has an empty source reference",
                    name, group
                )
            }
            ValidationError::DuplicateBandName { name } => {
                write!(f, "Duplicate output band name: '{}'", name)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Errors raised while loading a configuration document.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error reading config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid YAML/JSON config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unsupported config format for '{0}' (expected .yaml, .yml, .json or .toml)")]
    UnsupportedFormat(String),

    #[error("Configuration validation failed:\n{}", join_errors(.0))]
    Invalid(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
