// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for export job submission.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Export job about to be submitted.
///
/// # Log Level
/// `debug!` - Per-job detail
pub struct ExportRequested<'a> {
    pub kind: &'a str,
    pub description: &'a str,
    pub asset_id: &'a str,
}

impl Display for ExportRequested<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Submitting {} export '{}' to '{}'",
            self.kind, self.description, self.asset_id
        )
    }
}

impl StructuredLog for ExportRequested<'_> {
    fn log(&self) {
        tracing::debug!(
            kind = self.kind,
            description = self.description,
            asset_id = self.asset_id,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "export_request",
            span_name = name,
            kind = self.kind,
            description = self.description,
        )
    }
}

/// Export job accepted by the platform.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ExportSubmitted<'a> {
    pub kind: &'a str,
    pub description: &'a str,
    pub asset_id: &'a str,
    pub task_id: &'a str,
}

impl Display for ExportSubmitted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Submitted {} export '{}' to '{}' as task {}",
            self.kind, self.description, self.asset_id, self.task_id
        )
    }
}

impl StructuredLog for ExportSubmitted<'_> {
    fn log(&self) {
        tracing::info!(
            kind = self.kind,
            description = self.description,
            asset_id = self.asset_id,
            task_id = self.task_id,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "export",
            span_name = name,
            kind = self.kind,
            description = self.description,
        )
    }
}

/// Export job submission failed.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use mekong_knn::observability::messages::export::ExportFailed;
///
/// let error = std::io::Error::new(std::io::ErrorKind::Other, "quota exceeded");
/// let msg = ExportFailed {
///     description: "raw_realization1_2020",
///     error: &error,
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct ExportFailed<'a> {
    pub description: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for ExportFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Export '{}' could not be submitted: {}",
            self.description, self.error
        )
    }
}

impl StructuredLog for ExportFailed<'_> {
    fn log(&self) {
        tracing::error!(
            description = self.description,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "export_failed",
            span_name = name,
            description = self.description,
            error = %self.error,
        )
    }
}
