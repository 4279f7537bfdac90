// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Model instantiation, training and prediction.
//!
//! The ordination math lives in the external modeling library, reached through
//! remote functions. The types here only track the lifecycle
//! `configured -> model_instantiated -> trained -> predicted`:
//!
//! ```text
//! OrdinationMethod --OrdinationModel::new--> OrdinationModel
//!                  --train-->                TrainedModel
//!                  --predict / predict_fc--> Image / FeatureCollection
//! ```

use crate::config::consts::GNN_NUM_CCA_AXES;
use crate::errors::ModelError;
use crate::ordination::{Colocation, OrdinationMethod};
use crate::platform::{Expr, FeatureCollection, Image};

/// Species transform fixed for GNN runs.
pub const GNN_SPECIES_TRANSFORM: &str = "NONE";

/// An instantiated, untrained model.
#[derive(Debug, Clone, PartialEq)]
pub struct OrdinationModel {
    pub method: OrdinationMethod,
    pub k: u32,
    pub spp_transform: Option<&'static str>,
    pub num_cca_axes: Option<u32>,
}

impl OrdinationModel {
    pub fn new(method: OrdinationMethod, k: u32) -> Self {
        match method {
            OrdinationMethod::Gnn => Self {
                method,
                k,
                spp_transform: Some(GNN_SPECIES_TRANSFORM),
                num_cca_axes: Some(GNN_NUM_CCA_AXES),
            },
            OrdinationMethod::Raw
            | OrdinationMethod::Euclidean
            | OrdinationMethod::Mahalanobis
            | OrdinationMethod::Msn => Self {
                method,
                k,
                spp_transform: None,
                num_cca_axes: None,
            },
        }
    }

    /// Instantiate from a method identifier such as `"MSN"`.
    pub fn from_code(code: &str, k: u32) -> Result<Self, ModelError> {
        Ok(Self::new(code.parse()?, k))
    }

    fn parameters(&self) -> Expr {
        let mut entries = vec![
            ("method", Expr::constant(self.method.code())),
            ("k", Expr::constant(self.k)),
        ];
        if let Some(transform) = self.spp_transform {
            entries.push(("sppTransform", Expr::constant(transform)));
        }
        if let Some(axes) = self.num_cca_axes {
            entries.push(("numCcaAxes", Expr::constant(axes)));
        }
        Expr::dictionary(entries)
    }

    /// Fit on a signature table.
    ///
    /// `env_columns` are the covariate band names; `spp_columns` the species or
    /// attribute fields; `id_field` identifies each plot.
    pub fn train(
        &self,
        collection: &FeatureCollection,
        id_field: &str,
        spp_columns: &[String],
        env_columns: &[String],
    ) -> Result<TrainedModel, ModelError> {
        if env_columns.is_empty() {
            return Err(ModelError::NoCovariateBands {
                method: self.method.code().to_string(),
            });
        }

        let model = Expr::call(
            "Ordination.train",
            [
                ("model", self.parameters()),
                ("collection", collection.expr().clone()),
                ("idField", Expr::constant(id_field)),
                ("sppColumns", Expr::strings(spp_columns)),
                ("envColumns", Expr::strings(env_columns)),
            ],
        );

        Ok(TrainedModel {
            method: self.method,
            env_columns: env_columns.to_vec(),
            model,
        })
    }
}

/// A model fit on one signature table.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainedModel {
    pub method: OrdinationMethod,
    pub env_columns: Vec<String>,
    model: Expr,
}

impl TrainedModel {
    pub fn expr(&self) -> &Expr {
        &self.model
    }

    /// Predict every pixel of `image`.
    pub fn predict(&self, image: &Image) -> Image {
        Image::from_expr(Expr::call(
            "Ordination.predict",
            [("model", self.model.clone()), ("image", image.expr().clone())],
        ))
    }

    /// Predict every row of `collection`, optionally excluding colocated neighbors.
    pub fn predict_fc(
        &self,
        collection: &FeatureCollection,
        colocation: Option<&Colocation>,
    ) -> FeatureCollection {
        let colocation = colocation.map(Colocation::to_expr).unwrap_or_else(Expr::null);
        FeatureCollection::from_expr(Expr::call(
            "Ordination.predictFc",
            [
                ("model", self.model.clone()),
                ("collection", collection.expr().clone()),
                ("colocation", colocation),
            ],
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_gnn_fixes_transform_and_axes() {
        let gnn = OrdinationModel::new(OrdinationMethod::Gnn, 7);
        assert_eq!(gnn.spp_transform, Some("NONE"));
        assert_eq!(gnn.num_cca_axes, Some(8));
        assert_eq!(gnn.k, 7);

        for method in [
            OrdinationMethod::Raw,
            OrdinationMethod::Euclidean,
            OrdinationMethod::Mahalanobis,
            OrdinationMethod::Msn,
        ] {
            let model = OrdinationModel::new(method, 7);
            assert_eq!(model.spp_transform, None);
            assert_eq!(model.num_cca_axes, None);
        }
    }

    #[test]
    fn test_from_code_rejects_unknown() {
        assert_eq!(
            OrdinationModel::from_code("FOO", 5),
            Err(ModelError::UnknownMethod("FOO".to_string()))
        );
        assert_eq!(
            OrdinationModel::from_code("MAH", 5).unwrap().method,
            OrdinationMethod::Mahalanobis
        );
    }

    #[test]
    fn test_train_records_columns() {
        let fc = FeatureCollection::load("sig");
        let trained = OrdinationModel::new(OrdinationMethod::Msn, 5)
            .train(&fc, "PLOT_ID", &strings(&["TEAK"]), &strings(&["tcc", "elevation"]))
            .unwrap();

        let expr = trained.expr();
        assert_eq!(expr.function_name(), Some("Ordination.train"));
        assert_eq!(expr.argument_value("idField"), Some(&Expr::constant("PLOT_ID")));
        assert_eq!(expr.argument_value("sppColumns"), Some(&Expr::strings(["TEAK"])));
        assert_eq!(
            expr.argument_value("envColumns"),
            Some(&Expr::strings(["tcc", "elevation"]))
        );
        assert_eq!(
            expr.argument_value("model"),
            Some(&Expr::dictionary([
                ("method", Expr::constant("MSN")),
                ("k", Expr::constant(5)),
            ]))
        );
    }

    #[test]
    fn test_train_without_bands_fails() {
        let result = OrdinationModel::new(OrdinationMethod::Raw, 1).train(
            &FeatureCollection::load("sig"),
            "PLOT_ID",
            &strings(&["TEAK"]),
            &[],
        );
        assert!(matches!(result, Err(ModelError::NoCovariateBands { .. })));
    }

    #[test]
    fn test_predict_fc_without_colocation_passes_null() {
        let fc = FeatureCollection::load("sig");
        let trained = OrdinationModel::new(OrdinationMethod::Raw, 1)
            .train(&fc, "ID", &strings(&["A"]), &strings(&["b"]))
            .unwrap();
        let predicted = trained.predict_fc(&fc, None);
        assert_eq!(predicted.expr().argument_value("colocation"), Some(&Expr::null()));
    }
}
