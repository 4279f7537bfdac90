// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Typed builders for raster expressions.

use crate::platform::feature::{FeatureCollection, Filter, Geometry};
use crate::platform::Expr;

/// Property holding the platform-assigned asset id of an image.
pub const SYSTEM_ID: &str = "system:id";
/// Property holding an image's acquisition start time.
pub const SYSTEM_TIME_START: &str = "system:time_start";

/// Lazy reference to a single remote image.
#[derive(Debug, Clone, PartialEq)]
pub struct Image(Expr);

impl Image {
    pub fn from_expr(expr: Expr) -> Self {
        Self(expr)
    }

    pub fn expr(&self) -> &Expr {
        &self.0
    }

    pub fn into_expr(self) -> Expr {
        self.0
    }

    pub fn load(id: &str) -> Self {
        Self(Expr::call("Image.load", [("id", Expr::constant(id))]))
    }

    /// Two-band image carrying per-pixel `longitude` and `latitude`.
    pub fn pixel_lon_lat() -> Self {
        Self(Expr::call("Image.pixelLonLat", Vec::<(&str, Expr)>::new()))
    }

    /// Per-pixel random field, `distribution` is `uniform` or `normal`.
    pub fn random(seed: u64, distribution: &str) -> Self {
        Self(Expr::call(
            "Image.random",
            [
                ("seed", Expr::constant(seed)),
                ("distribution", Expr::constant(distribution)),
            ],
        ))
    }

    pub fn rename<S: AsRef<str>>(&self, names: &[S]) -> Self {
        Self(Expr::call(
            "Image.rename",
            [("input", self.0.clone()), ("names", Expr::strings(names))],
        ))
    }

    pub fn add(&self, other: &Image) -> Self {
        self.binary("Image.add", other)
    }

    pub fn multiply(&self, other: &Image) -> Self {
        self.binary("Image.multiply", other)
    }

    fn binary(&self, function_name: &str, other: &Image) -> Self {
        Self(Expr::call(
            function_name,
            [("image1", self.0.clone()), ("image2", other.0.clone())],
        ))
    }

    pub fn clamp(&self, low: f64, high: f64) -> Self {
        Self(Expr::call(
            "Image.clamp",
            [
                ("input", self.0.clone()),
                ("low", Expr::constant(low)),
                ("high", Expr::constant(high)),
            ],
        ))
    }

    pub fn add_bands(&self, other: &Image) -> Self {
        Self(Expr::call(
            "Image.addBands",
            [("dstImg", self.0.clone()), ("srcImg", other.0.clone())],
        ))
    }

    pub fn clip(&self, geometry: &Geometry) -> Self {
        Self(Expr::call(
            "Image.clip",
            [("input", self.0.clone()), ("geometry", geometry.expr().clone())],
        ))
    }

    /// Clip and resample for export.
    pub fn clip_to_bounds_and_scale(&self, geometry: &Geometry, scale: f64) -> Self {
        Self(Expr::call(
            "Image.clipToBoundsAndScale",
            [
                ("input", self.0.clone()),
                ("geometry", geometry.expr().clone()),
                ("scale", Expr::constant(scale)),
            ],
        ))
    }

    /// Reduce the image over every feature of `collection`.
    pub fn reduce_regions(
        &self,
        collection: &FeatureCollection,
        reducer: Reducer,
        scale: f64,
        tile_scale: f64,
    ) -> FeatureCollection {
        FeatureCollection::from_expr(Expr::call(
            "Image.reduceRegions",
            [
                ("image", self.0.clone()),
                ("collection", collection.expr().clone()),
                ("reducer", reducer.into_expr()),
                ("scale", Expr::constant(scale)),
                ("tileScale", Expr::constant(tile_scale)),
            ],
        ))
    }

    pub fn get(&self, property: &str) -> Expr {
        Expr::call(
            "Element.get",
            [("object", self.0.clone()), ("property", Expr::constant(property))],
        )
    }

    pub fn set(&self, key: &str, value: Expr) -> Self {
        Self(Expr::call(
            "Element.set",
            [
                ("object", self.0.clone()),
                ("key", Expr::constant(key)),
                ("value", value),
            ],
        ))
    }

    pub fn copy_properties(&self, source: &Image) -> Self {
        Self(Expr::call(
            "Element.copyProperties",
            [("destination", self.0.clone()), ("source", source.0.clone())],
        ))
    }
}

/// Lazy reference to a remote image collection.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageCollection(Expr);

impl ImageCollection {
    pub fn from_expr(expr: Expr) -> Self {
        Self(expr)
    }

    pub fn expr(&self) -> &Expr {
        &self.0
    }

    pub fn load(id: &str) -> Self {
        Self(Expr::call("ImageCollection.load", [("id", Expr::constant(id))]))
    }

    pub fn from_images<I>(images: I) -> Self
    where
        I: IntoIterator<Item = Image>,
    {
        Self(Expr::call(
            "ImageCollection.fromImages",
            [("images", Expr::array(images.into_iter().map(Image::into_expr)))],
        ))
    }

    /// Images whose start time falls in `[start, end)`, dates as `YYYY-MM-DD`.
    pub fn filter_date(&self, start: &str, end: &str) -> Self {
        let range = Expr::call(
            "DateRange",
            [("start", Expr::constant(start)), ("end", Expr::constant(end))],
        );
        self.filter(Filter::date_range_contains(range, SYSTEM_TIME_START))
    }

    /// Images acquired during calendar year `year`, expected within `1..=9999`.
    pub fn filter_year(&self, year: i32) -> Self {
        self.filter_date(
            &format!("{year:04}-01-01"),
            &format!("{:04}-01-01", year.saturating_add(1)),
        )
    }

    pub fn filter(&self, filter: Filter) -> Self {
        Self(Expr::call(
            "Collection.filter",
            [("collection", self.0.clone()), ("filter", filter.into_expr())],
        ))
    }

    pub fn size(&self) -> Expr {
        Expr::call("Collection.size", [("collection", self.0.clone())])
    }

    pub fn first(&self) -> Image {
        Image::from_expr(Expr::call("Collection.first", [("collection", self.0.clone())]))
    }

    /// Image at a (possibly lazy) position in the collection.
    pub fn image_at(&self, index: Expr) -> Image {
        let list = Expr::call(
            "Collection.toList",
            [
                ("collection", self.0.clone()),
                ("count", Expr::constant(1)),
                ("offset", index),
            ],
        );
        Image::from_expr(list_get(list, Expr::constant(0)))
    }

    /// Flatten the collection into one multi-band image.
    pub fn to_bands(&self) -> Image {
        Image::from_expr(Expr::call(
            "ImageCollection.toBands",
            [("collection", self.0.clone())],
        ))
    }
}

/// Aggregation applied per region by `reduceRegions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reducer {
    Mean,
}

impl Reducer {
    pub fn into_expr(self) -> Expr {
        match self {
            Reducer::Mean => Expr::call("Reducer.mean", Vec::<(&str, Expr)>::new()),
        }
    }
}

/// `[start, start + 1, ..., end]`.
pub fn list_sequence(start: Expr, end: Expr) -> Expr {
    Expr::call("List.sequence", [("start", start), ("end", end)])
}

pub fn list_shuffle(list: Expr, seed: u64) -> Expr {
    Expr::call("List.shuffle", [("list", list), ("seed", Expr::constant(seed))])
}

pub fn list_get(list: Expr, index: Expr) -> Expr {
    Expr::call("List.get", [("list", list), ("index", index)])
}

pub fn number_subtract(left: Expr, right: Expr) -> Expr {
    Expr::call("Number.subtract", [("left", left), ("right", right)])
}
