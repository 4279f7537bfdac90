// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Default footprint radius around each plot, in meters
pub const DEFAULT_FOOTPRINT_RADIUS: f64 = 15.0;
/// Default resolution for signature extraction, in projection units
pub const DEFAULT_SCALE: f64 = 30.0;
/// Tiling hint passed to region reductions over large plot tables
pub const EXTRACTION_TILE_SCALE: f64 = 16.0;

/// Calendar years accepted for model years and plot years; dates are written `YYYY-MM-DD`
pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

/// Fixed export resolution
pub const EXPORT_SCALE: f64 = 30.0;
/// Pixel cap for a single export job
pub const EXPORT_MAX_PIXELS: f64 = 1e13;
/// Export region used when the caller does not supply one: `[xmin, ymin, xmax, ymax]`
pub const DEFAULT_EXPORT_REGION: [f64; 4] = [104.528, 12.235, 104.554, 12.262];

/// Bounds applied after perturbing a value by its uncertainty
pub const UNCERTAINTY_CLAMP_LOW: f64 = 0.0;
pub const UNCERTAINTY_CLAMP_HIGH: f64 = 100.0;

/// Names of the optional coordinate bands appended to every composite
pub const LOCATION_BAND_NAMES: [&str; 2] = ["longitude", "latitude"];
/// Synthetic provenance id recorded for the coordinate bands
pub const LOCATION_SOURCE_ID: &str = "ee.Image.pixelLonLat";

/// Property copied from the plot id to drive colocation exclusion
pub const COLOCATION_LOCATION_FIELD: &str = "LOC_ID";
/// Canonical axes retained by GNN ordination
pub const GNN_NUM_CCA_AXES: u32 = 8;

/// Default REST endpoint of the remote platform
pub const DEFAULT_PLATFORM_ENDPOINT: &str = "https://earthengine.googleapis.com";
/// Environment variable holding the OAuth bearer token
pub const ACCESS_TOKEN_ENV: &str = "EE_ACCESS_TOKEN";
/// Environment variable consulted when the config names no project
pub const PROJECT_ENV: &str = "EE_PROJECT";
