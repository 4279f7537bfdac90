// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Client-side description of remote geospatial computations.
//!
//! Nothing in this module performs I/O. The builders compose an expression graph;
//! a [`Session`](crate::traits::Session) evaluates it or submits it as an export job.
//!
//! # Types
//!
//! - [`Expr`] / [`Expression`]: graph nodes and the submission envelope
//! - [`Image`], [`ImageCollection`], [`Reducer`]: raster builders
//! - [`Feature`], [`FeatureCollection`], [`Filter`], [`Geometry`]: vector builders
//! - [`ExportTask`]: export job requests

mod export;
mod expr;
mod feature;
mod image;

pub use export::{ExportPayload, ExportTask, TaskId};
pub use expr::{Expr, Expression};
pub use feature::{Feature, FeatureCollection, Filter, Geometry, MAPPING_VAR};
pub use image::{
    list_get, list_sequence, list_shuffle, number_subtract, Image, ImageCollection, Reducer,
    SYSTEM_ID, SYSTEM_TIME_START,
};
