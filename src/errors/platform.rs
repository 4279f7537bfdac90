// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors crossing the remote platform boundary.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlatformError {
    /// Session settings are incomplete (project, token).
    #[error("Platform session is not configured: {0}")]
    NotConfigured(String),

    /// Transport-level failure talking to the platform.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The platform answered with a non-success status.
    #[error("Platform request to '{endpoint}' failed with status {status}: {message}")]
    Rejected {
        endpoint: String,
        status: u16,
        message: String,
    },

    /// An evaluation result did not have the expected shape.
    #[error("Unexpected evaluation result: {0}")]
    UnexpectedResult(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
