// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Session backends for the remote geospatial platform.
//!
//! Each backend implements [`Session`](crate::traits::Session), the single I/O
//! boundary of the crate.
//!
//! # Available Backends
//!
//! ## Earth Engine Backend
//! REST client over `reqwest`:
//! - **Evaluation**: `value:compute` for small lookups such as the plot years
//! - **Exports**: `image:export` and `table:export`, fire-and-forget
//!
//! ## Stub Backend (Test-Only)
//! - **RecordingSession**: records requests, answers evaluations from a queue
//! - **FailingSession**: rejects every export submission
//! - **Note**: NOT available in production builds
//!
//! # Examples
//!
//! ```rust,no_run
//! use mekong_knn::backends::earth_engine::EarthEngineSession;
//! use mekong_knn::config::PlatformConfig;
//!
//! let settings = PlatformConfig { project: Some("servir-mekong".to_string()), endpoint: None };
//! let session = EarthEngineSession::connect(&settings)?;
//! # Ok::<(), mekong_knn::errors::PlatformError>(())
//! ```

pub mod earth_engine;
#[cfg(test)]
pub mod stub;
