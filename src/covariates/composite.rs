// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Multi-band covariate composites.
//!
//! A composite is one year's worth of covariates flattened into a single image.
//! Bands are ordered realization, uncertainty, yearly, static, then the optional
//! location bands. The client-side [`Composite::bands`] list and the remote
//! `band_sources` property follow the same order.

use crate::config::consts::{LOCATION_BAND_NAMES, LOCATION_SOURCE_ID};
use crate::config::Config;
use crate::covariates::seeds::SeedSource;
use crate::covariates::sources::{
    BandProvenance, RealizationCollection, SourceImage, SourceKind, StaticImage,
    UncertaintyCollection, YearlyCollection,
};
use crate::observability::messages::covariates::CompositeBuilt;
use crate::observability::messages::StructuredLog;
use crate::platform::{Expr, Image, ImageCollection};
use std::fmt::{Display, Formatter};

/// Image property listing per-band provenance dictionaries.
pub const BAND_SOURCES_PROPERTY: &str = "band_sources";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeMode {
    /// One random draw per stochastic source
    Random,
    /// First image of every source, no randomness
    Static,
}

impl CompositeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompositeMode::Random => "random",
            CompositeMode::Static => "static",
        }
    }
}

impl Display for CompositeMode {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A year's covariates as one multi-band image plus its band provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct Composite {
    pub year: i32,
    /// 1-based ensemble member; `None` for a composite built outside an ensemble
    pub realization: Option<u32>,
    pub mode: CompositeMode,
    pub image: Image,
    pub bands: Vec<BandProvenance>,
}

impl Composite {
    pub fn band_names(&self) -> Vec<String> {
        self.bands.iter().map(|b| b.band.clone()).collect()
    }

    pub fn first_band(&self) -> Option<&str> {
        self.bands.first().map(|b| b.band.as_str())
    }
}

/// Builds composites from the configured covariate sources.
#[derive(Debug, Clone)]
pub struct CompositeBuilder {
    realization_collections: Vec<RealizationCollection>,
    uncertainty_collections: Vec<UncertaintyCollection>,
    yearly_collections: Vec<YearlyCollection>,
    static_images: Vec<StaticImage>,
    with_location: bool,
    seeds: SeedSource,
}

impl CompositeBuilder {
    pub fn new(config: &Config, seeds: SeedSource) -> Self {
        let c = &config.covariates;
        Self {
            realization_collections: c
                .realization_collections
                .iter()
                .map(RealizationCollection::new)
                .collect(),
            uncertainty_collections: c
                .uncertainty_collections
                .iter()
                .map(UncertaintyCollection::new)
                .collect(),
            yearly_collections: c.yearly_collections.iter().map(YearlyCollection::new).collect(),
            static_images: c.static_images.iter().map(StaticImage::new).collect(),
            with_location: config.with_location(),
            seeds,
        }
    }

    pub fn with_location(mut self, with_location: bool) -> Self {
        self.with_location = with_location;
        self
    }

    pub fn seeds(&self) -> SeedSource {
        self.seeds
    }

    /// Random draw for `year`; `realization` keys the seeds of every draw.
    pub fn random_image_for_year(&self, year: i32, realization: u32) -> Composite {
        let offset = self.realization_collections.len();
        let seed = |position: usize| self.seeds.derive(year, realization, position);

        let sources: Vec<SourceImage> = self
            .realization_collections
            .iter()
            .enumerate()
            .map(|(i, r)| r.random_image_from_year(year, seed(i)))
            .chain(
                self.uncertainty_collections
                    .iter()
                    .enumerate()
                    .map(|(i, u)| u.random_image_from_year(year, seed(offset + i))),
            )
            .chain(self.deterministic_sources(year))
            .collect();

        self.assemble(year, Some(realization), CompositeMode::Random, sources)
    }

    pub fn static_image_for_year(&self, year: i32) -> Composite {
        let sources: Vec<SourceImage> = self
            .realization_collections
            .iter()
            .map(|r| r.static_image_from_year(year))
            .chain(
                self.uncertainty_collections
                    .iter()
                    .map(|u| u.static_image_from_year(year)),
            )
            .chain(self.deterministic_sources(year))
            .collect();

        self.assemble(year, None, CompositeMode::Static, sources)
    }

    /// Static composites ignore `realization` beyond tagging the record.
    pub fn build(&self, year: i32, mode: CompositeMode, realization: u32) -> Composite {
        match mode {
            CompositeMode::Random => self.random_image_for_year(year, realization),
            CompositeMode::Static => Composite {
                realization: Some(realization),
                ..self.static_image_for_year(year)
            },
        }
    }

    fn deterministic_sources(&self, year: i32) -> impl Iterator<Item = SourceImage> + '_ {
        self.yearly_collections
            .iter()
            .map(move |y| y.static_image_from_year(year))
            .chain(self.static_images.iter().map(StaticImage::static_image))
    }

    fn assemble(
        &self,
        year: i32,
        realization: Option<u32>,
        mode: CompositeMode,
        sources: Vec<SourceImage>,
    ) -> Composite {
        let mut band_sources: Vec<Expr> = sources.iter().map(SourceImage::source_dictionary).collect();
        let mut bands: Vec<BandProvenance> = Vec::with_capacity(sources.len() + 2);
        let mut images = Vec::with_capacity(sources.len());
        for source in sources {
            bands.push(source.provenance);
            images.push(source.image);
        }
        let names: Vec<&str> = bands.iter().map(|b| b.band.as_str()).collect();

        let mut image = ImageCollection::from_images(images).to_bands().rename(names.as_slice());

        if self.with_location {
            image = image.add_bands(&Image::pixel_lon_lat());
            for band in LOCATION_BAND_NAMES {
                band_sources.push(Expr::dictionary([("id", Expr::constant(LOCATION_SOURCE_ID))]));
                bands.push(BandProvenance {
                    band: band.to_string(),
                    kind: SourceKind::Location,
                    source: LOCATION_SOURCE_ID.to_string(),
                    uncertainty_source: None,
                    index: None,
                    seed: None,
                });
            }
        }

        let image = image.set(BAND_SOURCES_PROPERTY, Expr::array(band_sources));

        CompositeBuilt {
            year,
            realization,
            mode: mode.as_str(),
            band_count: bands.len(),
        }
        .log();

        Composite {
            year,
            realization,
            mode,
            image,
            bands,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::fixtures::training_config;
    use crate::platform::number_subtract;
    use std::collections::HashSet;

    fn builder(seed: u64) -> CompositeBuilder {
        CompositeBuilder::new(&training_config(), SeedSource::explicit(seed))
    }

    #[test]
    fn test_static_composite_is_idempotent() {
        let a = builder(1).static_image_for_year(2017);
        let b = builder(2).static_image_for_year(2017);
        assert_eq!(a, b);
        assert!(a.image.expr().find_invocations("List.shuffle").is_empty());
        assert!(a.image.expr().find_invocations("Image.random").is_empty());
    }

    #[test]
    fn test_random_composite_same_seed_same_selection() {
        assert_eq!(
            builder(42).random_image_for_year(2020, 1),
            builder(42).random_image_for_year(2020, 1)
        );
    }

    #[test]
    fn test_random_composite_differs_by_seed_and_realization() {
        let base = builder(42).random_image_for_year(2020, 1);
        assert_ne!(base, builder(43).random_image_for_year(2020, 1));
        assert_ne!(base.image, builder(42).random_image_for_year(2020, 2).image);
    }

    #[test]
    fn test_random_index_bounded_by_year_collection() {
        let config = training_config();
        let composite = builder(9).random_image_for_year(2020, 1);
        let tcc = &composite.bands[0];
        assert_eq!(tcc.kind, SourceKind::Realization);

        let year_collection =
            ImageCollection::load(&config.covariates.realization_collections[0].collection)
                .filter_year(2020);
        let index = tcc.index.as_ref().unwrap();
        let sequence = &index.find_invocations("List.sequence")[0];
        assert_eq!(sequence.argument_value("start"), Some(&Expr::constant(0)));
        assert_eq!(
            sequence.argument_value("end"),
            Some(&number_subtract(year_collection.size(), Expr::constant(1)))
        );
    }

    #[test]
    fn test_band_order_matches_configuration() {
        let config = training_config();
        let composite = builder(3).random_image_for_year(2020, 1);

        assert_eq!(composite.band_names(), config.composite_band_names());
        assert_eq!(composite.bands.len(), config.covariate_names().len() + 2);
        assert_eq!(composite.first_band(), Some("tcc"));

        let unique: HashSet<String> = composite.band_names().into_iter().collect();
        assert_eq!(unique.len(), composite.bands.len());

        let kinds: Vec<SourceKind> = composite.bands.iter().map(|b| b.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SourceKind::Realization,
                SourceKind::Uncertainty,
                SourceKind::Yearly,
                SourceKind::Static,
                SourceKind::Location,
                SourceKind::Location,
            ]
        );
    }

    #[test]
    fn test_band_sources_follow_band_order() {
        let composite = builder(3).static_image_for_year(2020);
        match composite.image.expr().argument_value("value") {
            Some(Expr::Array { values }) => {
                assert_eq!(values.len(), composite.bands.len());
                assert_eq!(
                    values[4],
                    Expr::dictionary([("id", Expr::constant("ee.Image.pixelLonLat"))])
                );
            }
            other => panic!("expected band_sources array, got {:?}", other),
        }
    }

    #[test]
    fn test_without_location_omits_coordinate_bands() {
        let config = training_config();
        let composite = builder(3).with_location(false).static_image_for_year(2020);
        assert_eq!(composite.bands.len(), config.covariate_names().len());
        assert!(composite
            .image
            .expr()
            .find_invocations("Image.pixelLonLat")
            .is_empty());
    }

    #[test]
    fn test_build_tags_static_realization() {
        let composite = builder(3).build(2020, CompositeMode::Static, 1);
        assert_eq!(composite.realization, Some(1));
        assert_eq!(composite.mode, CompositeMode::Static);
    }
}
