// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for ordination model runs.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A realization is about to be run through every configured method.
///
/// # Log Level
/// `info!` - Important operational event
pub struct RealizationRunStarted<'a> {
    pub year: i32,
    pub realization: u32,
    pub methods: &'a [String],
    pub mode: &'a str,
}

impl Display for RealizationRunStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Running {} {} model(s) on realization {} of {}",
            self.methods.len(),
            self.mode,
            self.realization,
            self.year
        )
    }
}

impl StructuredLog for RealizationRunStarted<'_> {
    fn log(&self) {
        tracing::info!(
            year = self.year,
            realization = self.realization,
            methods = ?self.methods,
            mode = self.mode,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "realization_run",
            span_name = name,
            year = self.year,
            realization = self.realization,
            mode = self.mode,
        )
    }
}

/// One method trained and applied.
///
/// # Log Level
/// `debug!` - Per-model detail
///
/// # Example
/// ```
/// use mekong_knn::observability::messages::model::ModelApplied;
///
/// let msg = ModelApplied {
///     method: "MSN",
///     k: 5,
///     env_columns: 6,
///     target: "image",
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct ModelApplied<'a> {
    pub method: &'a str,
    pub k: u32,
    pub env_columns: usize,
    pub target: &'a str,
}

impl Display for ModelApplied<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Trained {} (k={}) on {} covariate column(s), predicting {}",
            self.method, self.k, self.env_columns, self.target
        )
    }
}

impl StructuredLog for ModelApplied<'_> {
    fn log(&self) {
        tracing::debug!(
            method = self.method,
            k = self.k,
            env_columns = self.env_columns,
            target = self.target,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "model",
            span_name = name,
            method = self.method,
            k = self.k,
            target = self.target,
        )
    }
}

/// Method identifier could not be resolved.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct UnknownMethodRejected<'a> {
    pub method: &'a str,
}

impl Display for UnknownMethodRejected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Rejected unknown ordination method '{}'", self.method)
    }
}

impl StructuredLog for UnknownMethodRejected<'_> {
    fn log(&self) {
        tracing::error!(method = self.method, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!("unknown_method", span_name = name, method = self.method)
    }
}
