// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Asynchronous export job descriptions.
//!
//! An [`ExportTask`] is a fully-built request; submitting it through
//! [`Session::start_export`](crate::traits::Session::start_export) is fire-and-forget.

use crate::config::consts::{EXPORT_MAX_PIXELS, EXPORT_SCALE};
use crate::platform::{FeatureCollection, Geometry, Image};
use std::collections::BTreeMap;
use std::fmt;

/// What an export job writes.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportPayload {
    Image {
        image: Image,
        region: Geometry,
        scale: f64,
        pyramiding_policy: BTreeMap<String, String>,
        max_pixels: f64,
    },
    Table {
        collection: FeatureCollection,
    },
}

/// A single export-to-asset job.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportTask {
    pub description: String,
    pub asset_id: String,
    pub payload: ExportPayload,
}

impl ExportTask {
    /// Image export with the fixed job parameters: 30 unit scale, `mode` pyramiding
    /// for every band, and a 1e13 pixel cap.
    pub fn image(description: &str, asset_id: &str, image: Image, region: Geometry) -> Self {
        let mut pyramiding_policy = BTreeMap::new();
        pyramiding_policy.insert(".default".to_string(), "mode".to_string());
        Self {
            description: description.to_string(),
            asset_id: asset_id.to_string(),
            payload: ExportPayload::Image {
                image,
                region,
                scale: EXPORT_SCALE,
                pyramiding_policy,
                max_pixels: EXPORT_MAX_PIXELS,
            },
        }
    }

    pub fn table(description: &str, asset_id: &str, collection: FeatureCollection) -> Self {
        Self {
            description: description.to_string(),
            asset_id: asset_id.to_string(),
            payload: ExportPayload::Table { collection },
        }
    }

    pub fn kind(&self) -> &'static str {
        match self.payload {
            ExportPayload::Image { .. } => "image",
            ExportPayload::Table { .. } => "table",
        }
    }
}

/// Platform-assigned identifier of a submitted job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskId(pub String);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
