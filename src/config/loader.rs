// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::{DEFAULT_FOOTPRINT_RADIUS, DEFAULT_SCALE, LOCATION_BAND_NAMES};
use crate::errors::ConfigError;
use crate::observability::messages::validation::{ConfigLoaded, ConfigValidationFailed};
use crate::observability::messages::StructuredLog;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Complete description of one mapping job.
///
/// Loaded once at startup and shared read-only by every component. All list fields
/// are required; the trailing optional fields fall back to built-in defaults.
///
/// # Example
/// ```yaml
/// k: 5
/// p: 2
/// methods: [RAW, MSN]
/// covariates:
///   realization_collections:
///     - name: tcc
///       collection: projects/servir/tcc_realizations
///   uncertainty_collections:
///     - name: canopy_height
///       collection: projects/servir/canopy_height
///       uncertainty_collection: projects/servir/canopy_height_sd
///   yearly_collections:
///     - name: landsat_ndvi
///       collection: projects/servir/ndvi_composites
///   static_images:
///     - name: elevation
///       image: USGS/SRTMGL1_003
/// species_fields: [TEAK_BA, DIPT_BA]
/// categorical_fields: [FOREST_TYPE]
/// plots: projects/servir/plots
/// model_years: [2017]
/// nn_id_field: PLOT_ID
/// year_field: MEAS_YEAR
/// output_collection: projects/servir/knn_maps
/// output_fc_collection: projects/servir/knn_accuracy
/// output_accuracy_statistics: projects/servir/knn_stats
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub k: u32,
    pub p: u32,
    pub methods: Vec<String>,
    pub covariates: CovariatesConfig,
    pub species_fields: Vec<String>,
    pub categorical_fields: Vec<String>,
    pub plots: String,
    pub model_years: Vec<i32>,
    pub nn_id_field: String,
    pub year_field: String,
    pub output_collection: String,
    pub output_fc_collection: String,
    pub output_accuracy_statistics: String,
    /// Base seed for every random draw; the current time is used when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub footprint_radius: Option<f64>,
    #[serde(default)]
    pub scale: Option<f64>,
    #[serde(default)]
    pub with_location: Option<bool>,
    #[serde(default)]
    pub platform: PlatformConfig,
}

/// The four covariate source groups, in composition order.
#[derive(Debug, Clone, Deserialize)]
pub struct CovariatesConfig {
    pub realization_collections: Vec<RealizationCollectionConfig>,
    pub uncertainty_collections: Vec<UncertaintyCollectionConfig>,
    pub yearly_collections: Vec<YearlyCollectionConfig>,
    pub static_images: Vec<StaticImageConfig>,
}

/// Collection holding several equally-likely realizations per year.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RealizationCollectionConfig {
    pub name: String,
    pub collection: String,
}

/// Yearly values paired with a yearly per-pixel uncertainty.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct UncertaintyCollectionConfig {
    pub name: String,
    pub collection: String,
    pub uncertainty_collection: String,
}

/// One deterministic image per year.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct YearlyCollectionConfig {
    pub name: String,
    pub collection: String,
}

/// A single image used for every year.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StaticImageConfig {
    pub name: String,
    pub image: String,
}

/// Remote platform connection settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlatformConfig {
    pub project: Option<String>,
    pub endpoint: Option<String>,
}

impl Config {
    pub fn footprint_radius(&self) -> f64 {
        self.footprint_radius.unwrap_or(DEFAULT_FOOTPRINT_RADIUS)
    }

    pub fn scale(&self) -> f64 {
        self.scale.unwrap_or(DEFAULT_SCALE)
    }

    pub fn with_location(&self) -> bool {
        self.with_location.unwrap_or(true)
    }

    /// Output band names in composition order, without location bands.
    pub fn covariate_names(&self) -> Vec<&str> {
        let c = &self.covariates;
        c.realization_collections
            .iter()
            .map(|r| r.name.as_str())
            .chain(c.uncertainty_collections.iter().map(|u| u.name.as_str()))
            .chain(c.yearly_collections.iter().map(|y| y.name.as_str()))
            .chain(c.static_images.iter().map(|s| s.name.as_str()))
            .collect()
    }

    /// Every band of an ensemble composite, location bands included when enabled.
    pub fn composite_band_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.covariate_names().into_iter().map(String::from).collect();
        if self.with_location() {
            names.extend(LOCATION_BAND_NAMES.iter().map(|n| n.to_string()));
        }
        names
    }
}

/// Document formats accepted by [`load_config`], chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML; JSON documents are parsed through the same path.
    Yaml,
    Toml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match extension.as_deref() {
            Some("yaml") | Some("yml") | Some("json") => Ok(ConfigFormat::Yaml),
            Some("toml") => Ok(ConfigFormat::Toml),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Parse a config document without validating it.
pub fn parse_config(content: &str, format: ConfigFormat) -> Result<Config, ConfigError> {
    let cfg = match format {
        ConfigFormat::Yaml => serde_yaml::from_str(content)?,
        ConfigFormat::Toml => toml::from_str(content)?,
    };
    Ok(cfg)
}

/// Load a config from a YAML, JSON or TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let format = ConfigFormat::from_path(path)?;
    let content = fs::read_to_string(path)?;
    parse_config(&content, format)
}

/// Load and validate a config file
///
/// Every validation problem is reported at once. Nothing here touches the remote
/// platform, so a bad document stops the run before any session exists.
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let cfg = load_config(path)?;

    if let Err(errors) = crate::config::validate_config(&cfg) {
        ConfigValidationFailed {
            path: &path.display().to_string(),
            error_count: errors.len(),
        }
        .log();
        return Err(ConfigError::Invalid(errors));
    }

    ConfigLoaded {
        path: &path.display().to_string(),
        model_years: cfg.model_years.len(),
        realizations: cfg.p,
        methods: cfg.methods.len(),
        bands: cfg.composite_band_names().len(),
    }
    .log();

    Ok(cfg)
}
