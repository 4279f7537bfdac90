// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::COLOCATION_LOCATION_FIELD;
use crate::platform::{Expr, FeatureCollection};

/// Self-assignment exclusion for table-mode prediction.
///
/// Plots that share a location id never nominate each other as neighbors. Each plot
/// is its own location here: the location id is a copy of the plot id.
#[derive(Debug, Clone, PartialEq)]
pub struct Colocation {
    pub collection: FeatureCollection,
    pub location_field: String,
    pub plot_field: String,
}

impl Colocation {
    pub fn from_plots(plots: &FeatureCollection, nn_id_field: &str) -> Self {
        let id_field = nn_id_field.to_string();
        let collection =
            plots.map(|f| f.set(COLOCATION_LOCATION_FIELD, f.get(&id_field)));
        Self {
            collection,
            location_field: COLOCATION_LOCATION_FIELD.to_string(),
            plot_field: nn_id_field.to_string(),
        }
    }

    pub fn to_expr(&self) -> Expr {
        Expr::call(
            "Ordination.colocation",
            [
                ("collection", self.collection.expr().clone()),
                ("locationField", Expr::constant(self.location_field.as_str())),
                ("plotField", Expr::constant(self.plot_field.as_str())),
            ],
        )
    }
}
