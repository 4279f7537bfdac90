// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements `Display` for the human-readable line and
//! [`StructuredLog`] to emit it with typed fields at its fixed level.
//!
//! # Organization
//!
//! * `covariates` - composite and realization construction
//! * `model` - ordination model instantiation, training and prediction
//! * `export` - export job submission
//! * `session` - remote platform session lifecycle and evaluations
//! * `validation` - configuration loading and validation
//!
//! # Usage Pattern
//!
//! ```rust
//! use mekong_knn::observability::messages::export::ExportSubmitted;
//! use mekong_knn::observability::messages::StructuredLog;
//!
//! let msg = ExportSubmitted {
//!     kind: "image",
//!     description: "msn_realization1_2020",
//!     asset_id: "projects/servir/maps/msn_realization1_2020",
//!     task_id: "6QAEXBXZ",
//! };
//!
//! msg.log();
//! ```

pub mod covariates;
pub mod export;
pub mod model;
pub mod session;
pub mod validation;

use tracing::Span;

/// A log message that knows its level and its structured fields.
pub trait StructuredLog {
    /// Emit the message as a single event.
    fn log(&self);

    /// Open a span carrying the message's fields.
    fn span(&self, name: &str) -> Span;
}
