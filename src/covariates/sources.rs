// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The four covariate source kinds.
//!
//! Each source yields one single-band image renamed to its configured name, with a
//! `src` property describing where the band came from. The same description is kept
//! client-side as a [`BandProvenance`].

use crate::config::consts::{UNCERTAINTY_CLAMP_HIGH, UNCERTAINTY_CLAMP_LOW};
use crate::config::{
    RealizationCollectionConfig, StaticImageConfig, UncertaintyCollectionConfig,
    YearlyCollectionConfig,
};
use crate::platform::{
    list_get, list_sequence, list_shuffle, number_subtract, Expr, Image, ImageCollection,
    SYSTEM_ID,
};

/// Property on each source image holding its provenance dictionary.
pub const SOURCE_PROPERTY: &str = "src";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Realization,
    Uncertainty,
    Yearly,
    Static,
    /// Synthetic coordinate band
    Location,
}

/// Where one composite band came from.
#[derive(Debug, Clone, PartialEq)]
pub struct BandProvenance {
    pub band: String,
    pub kind: SourceKind,
    /// Configured collection or image id
    pub source: String,
    /// Configured uncertainty collection; absent in static mode
    pub uncertainty_source: Option<String>,
    /// Position of the selected image within the year's collection
    pub index: Option<Expr>,
    /// Seed of the random draw, if any
    pub seed: Option<u64>,
}

/// One renamed source image plus its provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceImage {
    pub image: Image,
    pub provenance: BandProvenance,
}

impl SourceImage {
    /// The remote provenance dictionary attached to the image.
    pub fn source_dictionary(&self) -> Expr {
        self.image.get(SOURCE_PROPERTY)
    }
}

/// Uniformly random position in `collection`, drawn by shuffling `0..size` remotely.
pub fn random_index(collection: &ImageCollection, seed: u64) -> Expr {
    let last = number_subtract(collection.size(), Expr::constant(1));
    let shuffled = list_shuffle(list_sequence(Expr::constant(0), last), seed);
    list_get(shuffled, Expr::constant(0))
}

/// Collection of equally-likely realizations per year.
#[derive(Debug, Clone)]
pub struct RealizationCollection {
    pub name: String,
    pub source: String,
    pub collection: ImageCollection,
}

impl RealizationCollection {
    pub fn new(config: &RealizationCollectionConfig) -> Self {
        Self {
            name: config.name.clone(),
            source: config.collection.clone(),
            collection: ImageCollection::load(&config.collection),
        }
    }

    pub fn filter_by_year(&self, year: i32) -> ImageCollection {
        self.collection.filter_year(year)
    }

    pub fn random_image_from_year(&self, year: i32, seed: u64) -> SourceImage {
        let filtered = self.filter_by_year(year);
        let idx = random_index(&filtered, seed);
        let img = filtered.image_at(idx.clone()).rename(&[&self.name]);
        let src = Expr::dictionary([("id", img.get(SYSTEM_ID)), ("idx", idx.clone())]);

        SourceImage {
            image: img.set(SOURCE_PROPERTY, src),
            provenance: self.provenance(Some(idx), Some(seed)),
        }
    }

    pub fn static_image_from_year(&self, year: i32) -> SourceImage {
        let img = self.filter_by_year(year).first().rename(&[&self.name]);
        let idx = Expr::constant(0);
        let src = Expr::dictionary([("id", img.get(SYSTEM_ID)), ("idx", idx.clone())]);

        SourceImage {
            image: img.set(SOURCE_PROPERTY, src),
            provenance: self.provenance(Some(idx), None),
        }
    }

    fn provenance(&self, index: Option<Expr>, seed: Option<u64>) -> BandProvenance {
        BandProvenance {
            band: self.name.clone(),
            kind: SourceKind::Realization,
            source: self.source.clone(),
            uncertainty_source: None,
            index,
            seed,
        }
    }
}

/// Yearly values perturbed by a yearly per-pixel uncertainty.
#[derive(Debug, Clone)]
pub struct UncertaintyCollection {
    pub name: String,
    pub source: String,
    pub uncertainty_source: String,
    pub collection: ImageCollection,
    pub uncertainty_collection: ImageCollection,
}

impl UncertaintyCollection {
    pub fn new(config: &UncertaintyCollectionConfig) -> Self {
        Self {
            name: config.name.clone(),
            source: config.collection.clone(),
            uncertainty_source: config.uncertainty_collection.clone(),
            collection: ImageCollection::load(&config.collection),
            uncertainty_collection: ImageCollection::load(&config.uncertainty_collection),
        }
    }

    pub fn filter_collection_by_year(&self, year: i32) -> ImageCollection {
        self.collection.filter_year(year)
    }

    pub fn filter_uncertainty_collection_by_year(&self, year: i32) -> ImageCollection {
        self.uncertainty_collection.filter_year(year)
    }

    /// `clamp(value + uncertainty * N(0, 1), 0, 100)` with one noise field per draw.
    pub fn random_image_from_year(&self, year: i32, seed: u64) -> SourceImage {
        let img = self.filter_collection_by_year(year).first();
        let uncertainty_img = self.filter_uncertainty_collection_by_year(year).first();
        let noise = Image::random(seed, "normal");

        let out = img
            .add(&uncertainty_img.multiply(&noise))
            .clamp(UNCERTAINTY_CLAMP_LOW, UNCERTAINTY_CLAMP_HIGH)
            .rename(&[&self.name]);
        let src = Expr::dictionary([
            ("id", img.get(SYSTEM_ID)),
            ("uncertainty_id", uncertainty_img.get(SYSTEM_ID)),
        ]);

        SourceImage {
            image: out.set(SOURCE_PROPERTY, src),
            provenance: BandProvenance {
                band: self.name.clone(),
                kind: SourceKind::Uncertainty,
                source: self.source.clone(),
                uncertainty_source: Some(self.uncertainty_source.clone()),
                index: None,
                seed: Some(seed),
            },
        }
    }

    /// Unperturbed value; the uncertainty id is recorded as null.
    pub fn static_image_from_year(&self, year: i32) -> SourceImage {
        let out = self.filter_collection_by_year(year).first().rename(&[&self.name]);
        let src = Expr::dictionary([("id", out.get(SYSTEM_ID)), ("uncertainty_id", Expr::null())]);

        SourceImage {
            image: out.set(SOURCE_PROPERTY, src),
            provenance: BandProvenance {
                band: self.name.clone(),
                kind: SourceKind::Uncertainty,
                source: self.source.clone(),
                uncertainty_source: None,
                index: None,
                seed: None,
            },
        }
    }
}

/// One deterministic image per year.
#[derive(Debug, Clone)]
pub struct YearlyCollection {
    pub name: String,
    pub source: String,
    pub collection: ImageCollection,
}

impl YearlyCollection {
    pub fn new(config: &YearlyCollectionConfig) -> Self {
        Self {
            name: config.name.clone(),
            source: config.collection.clone(),
            collection: ImageCollection::load(&config.collection),
        }
    }

    pub fn filter_by_year(&self, year: i32) -> ImageCollection {
        self.collection.filter_year(year)
    }

    pub fn static_image_from_year(&self, year: i32) -> SourceImage {
        let img = self.filter_by_year(year).first().rename(&[&self.name]);
        let src = Expr::dictionary([("id", img.get(SYSTEM_ID))]);

        SourceImage {
            image: img.set(SOURCE_PROPERTY, src),
            provenance: BandProvenance {
                band: self.name.clone(),
                kind: SourceKind::Yearly,
                source: self.source.clone(),
                uncertainty_source: None,
                index: None,
                seed: None,
            },
        }
    }
}

/// A fixed image, identical for every year.
#[derive(Debug, Clone)]
pub struct StaticImage {
    pub name: String,
    pub source: String,
    pub image: Image,
}

impl StaticImage {
    pub fn new(config: &StaticImageConfig) -> Self {
        Self {
            name: config.name.clone(),
            source: config.image.clone(),
            image: Image::load(&config.image),
        }
    }

    pub fn static_image(&self) -> SourceImage {
        let img = self.image.rename(&[&self.name]);
        let src = Expr::dictionary([("id", img.get(SYSTEM_ID))]);

        SourceImage {
            image: img.set(SOURCE_PROPERTY, src),
            provenance: BandProvenance {
                band: self.name.clone(),
                kind: SourceKind::Static,
                source: self.source.clone(),
                uncertainty_source: None,
                index: None,
                seed: None,
            },
        }
    }
}
