// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for covariate composite construction.
//!
//! This module contains message types for logging events related to:
//! * Composite assembly for a year and mode
//! * Ensemble generation for a model year
//! * Signature extraction planning for plot years

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Composite graph assembled.
///
/// # Log Level
/// `debug!` - Per-composite detail
///
/// # Example
/// ```
/// use mekong_knn::observability::messages::covariates::CompositeBuilt;
///
/// let msg = CompositeBuilt {
///     year: 2020,
///     realization: Some(1),
///     mode: "random",
///     band_count: 6,
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct CompositeBuilt<'a> {
    pub year: i32,
    pub realization: Option<u32>,
    pub mode: &'a str,
    pub band_count: usize,
}

impl Display for CompositeBuilt<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self.realization {
            Some(r) => write!(
                f,
                "Built {} composite for {} (realization {}): {} bands",
                self.mode, self.year, r, self.band_count
            ),
            None => write!(
                f,
                "Built {} composite for {}: {} bands",
                self.mode, self.year, self.band_count
            ),
        }
    }
}

impl StructuredLog for CompositeBuilt<'_> {
    fn log(&self) {
        tracing::debug!(
            year = self.year,
            realization = self.realization,
            mode = self.mode,
            band_count = self.band_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "composite",
            span_name = name,
            year = self.year,
            realization = self.realization,
            mode = self.mode,
        )
    }
}

/// Ensemble of realizations generated for a model year.
///
/// # Log Level
/// `info!` - Important operational event
pub struct EnsembleGenerated<'a> {
    pub year: i32,
    pub mode: &'a str,
    pub realizations: usize,
}

impl Display for EnsembleGenerated<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Generated {} {} realization(s) for {}",
            self.realizations, self.mode, self.year
        )
    }
}

impl StructuredLog for EnsembleGenerated<'_> {
    fn log(&self) {
        tracing::info!(
            year = self.year,
            mode = self.mode,
            realizations = self.realizations,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "ensemble",
            span_name = name,
            year = self.year,
            mode = self.mode,
            realizations = self.realizations,
        )
    }
}

/// Plot years resolved for same-year signature extraction.
///
/// # Log Level
/// `info!` - Important operational event
pub struct PlotYearsResolved<'a> {
    pub year_field: &'a str,
    pub years: &'a [i32],
}

impl Display for PlotYearsResolved<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Plot table spans {} year(s) by '{}': {:?}",
            self.years.len(),
            self.year_field,
            self.years
        )
    }
}

impl StructuredLog for PlotYearsResolved<'_> {
    fn log(&self) {
        tracing::info!(
            year_field = self.year_field,
            year_count = self.years.len(),
            years = ?self.years,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "plot_years",
            span_name = name,
            year_field = self.year_field,
            year_count = self.years.len(),
        )
    }
}
