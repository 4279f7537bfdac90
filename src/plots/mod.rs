// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Field plots and their covariate signatures.

pub mod extract;

pub use extract::{extract_matching_year_signatures, extract_signatures, YearSignatures};

use crate::config::Config;
use crate::covariates::{Composite, CompositeMode, Covariates};
use crate::errors::PlatformError;
use crate::platform::FeatureCollection;
use crate::traits::Session;

/// The plot table and the fields that identify and describe each plot.
#[derive(Debug, Clone, PartialEq)]
pub struct Plots {
    pub collection: FeatureCollection,
    pub nn_id_field: String,
    pub year_field: String,
    pub species_fields: Vec<String>,
}

impl Plots {
    pub fn new(config: &Config) -> Self {
        Self {
            collection: FeatureCollection::load(&config.plots),
            nn_id_field: config.nn_id_field.clone(),
            year_field: config.year_field.clone(),
            species_fields: config.species_fields.clone(),
        }
    }
}

/// Plots joined to same-year covariate signatures.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotsWithCovariates {
    pub plots: Plots,
    /// Signature table: plot attributes plus one mean value per covariate band
    pub env_fc: FeatureCollection,
    /// Composite used for each plot year, in year order
    pub composites: Vec<Composite>,
}

impl PlotsWithCovariates {
    pub async fn match_by_year(
        session: &dyn Session,
        plots: Plots,
        covariates: &Covariates,
        radius: f64,
        scale: f64,
        mode: CompositeMode,
    ) -> Result<Self, PlatformError> {
        let signatures = extract_matching_year_signatures(
            session,
            &plots.collection,
            covariates,
            &plots.year_field,
            radius,
            scale,
            mode,
        )
        .await?;

        Ok(Self {
            plots,
            env_fc: signatures.collection,
            composites: signatures.composites,
        })
    }

    /// Configured footprint radius and scale, random signature draws.
    pub async fn from_config(
        session: &dyn Session,
        config: &Config,
        covariates: &Covariates,
    ) -> Result<Self, PlatformError> {
        Self::match_by_year(
            session,
            Plots::new(config),
            covariates,
            config.footprint_radius(),
            config.scale(),
            CompositeMode::Random,
        )
        .await
    }
}
