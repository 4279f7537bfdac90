// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for the remote platform session.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Session opened.
///
/// # Log Level
/// `info!` - Important operational event
pub struct SessionOpened<'a> {
    pub endpoint: &'a str,
    pub project: &'a str,
}

impl Display for SessionOpened<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Opened platform session for project '{}' at {}",
            self.project, self.endpoint
        )
    }
}

impl StructuredLog for SessionOpened<'_> {
    fn log(&self) {
        tracing::info!(endpoint = self.endpoint, project = self.project, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "session",
            span_name = name,
            endpoint = self.endpoint,
            project = self.project,
        )
    }
}

/// Session closed.
///
/// # Log Level
/// `info!` - Important operational event
pub struct SessionClosed<'a> {
    pub project: &'a str,
    pub evaluations: usize,
    pub exports: usize,
}

impl Display for SessionClosed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Closed platform session for project '{}' after {} evaluation(s) and {} export(s)",
            self.project, self.evaluations, self.exports
        )
    }
}

impl StructuredLog for SessionClosed<'_> {
    fn log(&self) {
        tracing::info!(
            project = self.project,
            evaluations = self.evaluations,
            exports = self.exports,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("session_closed", span_name = name, project = self.project)
    }
}

/// Expression sent for synchronous evaluation.
///
/// # Log Level
/// `debug!` - Request detail
pub struct EvaluationRequested<'a> {
    pub url: &'a str,
    pub root_function: &'a str,
}

impl Display for EvaluationRequested<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Evaluating '{}' via {}", self.root_function, self.url)
    }
}

impl StructuredLog for EvaluationRequested<'_> {
    fn log(&self) {
        tracing::debug!(url = self.url, root_function = self.root_function, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "evaluation",
            span_name = name,
            root_function = self.root_function,
        )
    }
}
