// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Covariate composites and realization ensembles.
//!
//! # Structure
//!
//! * `sources` - the four source kinds and their per-band provenance
//! * `composite` - flattening one year's sources into a multi-band image
//! * `ensemble` - repeated composites for a model year
//! * `seeds` - reproducible seed derivation for random draws

mod composite;
mod ensemble;
mod seeds;
mod sources;

pub use composite::{Composite, CompositeBuilder, CompositeMode, BAND_SOURCES_PROPERTY};
pub use ensemble::Covariates;
pub use seeds::SeedSource;
pub use sources::{
    random_index, BandProvenance, RealizationCollection, SourceImage, SourceKind, StaticImage,
    UncertaintyCollection, YearlyCollection, SOURCE_PROPERTY,
};
