// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! Message types follow a struct-based pattern with `Display` for the readable line
//! and [`messages::StructuredLog`] for typed fields, so no log string is built ad
//! hoc at a call site.
//!
//! # Usage
//!
//! ```rust
//! use mekong_knn::observability::messages::model::UnknownMethodRejected;
//! use mekong_knn::observability::messages::StructuredLog;
//!
//! UnknownMethodRejected { method: "KNN" }.log();
//! ```
//!
//! The subscriber is installed once by the binary through [`init_tracing`]; the
//! filter comes from `RUST_LOG` and defaults to `info`.

pub mod messages;
#[cfg(test)]
pub(crate) mod capture;

use tracing_subscriber::EnvFilter;

/// Install the global `fmt` subscriber. Calling it twice is harmless.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
