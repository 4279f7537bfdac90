// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Binding to the external nearest-neighbor ordination library.

mod colocation;
mod method;
mod model;

pub use colocation::Colocation;
pub use method::{parse_methods, OrdinationMethod};
pub use model::{OrdinationModel, TrainedModel, GNN_SPECIES_TRANSFORM};
