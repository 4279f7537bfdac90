// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for configuration loading and validation.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Configuration accepted.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ConfigLoaded<'a> {
    pub path: &'a str,
    pub model_years: usize,
    pub realizations: u32,
    pub methods: usize,
    pub bands: usize,
}

impl Display for ConfigLoaded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Loaded config '{}': {} model years x {} realizations x {} methods, {} bands per composite",
            self.path, self.model_years, self.realizations, self.methods, self.bands
        )
    }
}

impl StructuredLog for ConfigLoaded<'_> {
    fn log(&self) {
        tracing::info!(
            path = self.path,
            model_years = self.model_years,
            realizations = self.realizations,
            methods = self.methods,
            bands = self.bands,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("config_loaded", span_name = name, path = self.path)
    }
}

/// Configuration rejected by validation.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use mekong_knn::observability::messages::validation::ConfigValidationFailed;
///
/// let msg = ConfigValidationFailed {
///     path: "configs/training.yaml",
///     error_count: 2,
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct ConfigValidationFailed<'a> {
    pub path: &'a str,
    pub error_count: usize,
}

impl Display for ConfigValidationFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Config '{}' failed validation with {} error(s)",
            self.path, self.error_count
        )
    }
}

impl StructuredLog for ConfigValidationFailed<'_> {
    fn log(&self) {
        tracing::error!(path = self.path, error_count = self.error_count, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "config_validation_failed",
            span_name = name,
            path = self.path,
            error_count = self.error_count,
        )
    }
}
