// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Runs every configured ordination method over a set of covariate realizations.
//!
//! Two prediction targets are supported:
//! - **image**: predict the realization raster, one [`ModelOutput`] per
//!   (realization, method)
//! - **table**: predict the plot signature table itself, with colocated plots
//!   excluded as neighbors, one [`AccuracyOutput`] per (realization, method)
//!
//! Both targets drop signature rows whose first covariate band is null before
//! training.

use crate::covariates::Composite;
use crate::errors::ModelError;
use crate::observability::messages::model::{ModelApplied, RealizationRunStarted};
use crate::observability::messages::StructuredLog;
use crate::ordination::{
    parse_methods, Colocation, OrdinationMethod, OrdinationModel, TrainedModel,
};
use crate::platform::{Expr, FeatureCollection, Filter, Image};
use crate::plots::PlotsWithCovariates;

/// Image property naming the method that produced a prediction.
pub const ORDINATION_METHOD_PROPERTY: &str = "ordination_method";

/// One predicted raster.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelOutput {
    pub year: i32,
    pub realization: u32,
    pub method: OrdinationMethod,
    pub image: Image,
}

impl ModelOutput {
    /// `{method}_realization{p}_{year}` with the method in lower case.
    pub fn name(&self) -> String {
        output_name(self.method, self.realization, self.year)
    }
}

/// One predicted plot table.
#[derive(Debug, Clone, PartialEq)]
pub struct AccuracyOutput {
    pub year: i32,
    pub realization: u32,
    pub method: OrdinationMethod,
    pub table: FeatureCollection,
}

impl AccuracyOutput {
    pub fn name(&self) -> String {
        output_name(self.method, self.realization, self.year)
    }
}

fn output_name(method: OrdinationMethod, realization: u32, year: i32) -> String {
    format!(
        "{}_realization{}_{}",
        method.code().to_lowercase(),
        realization,
        year
    )
}

pub struct Wrapper<'a> {
    plots: &'a PlotsWithCovariates,
    realizations: Vec<Composite>,
    method_names: Vec<String>,
    methods: Vec<OrdinationMethod>,
    k: u32,
}

impl<'a> Wrapper<'a> {
    /// Fails on the first method identifier that is not a known ordination method.
    pub fn new(
        plots: &'a PlotsWithCovariates,
        realizations: Vec<Composite>,
        methods: &[String],
        k: u32,
    ) -> Result<Self, ModelError> {
        Ok(Self::with_methods(plots, realizations, parse_methods(methods)?, k))
    }

    pub fn with_methods(
        plots: &'a PlotsWithCovariates,
        realizations: Vec<Composite>,
        methods: Vec<OrdinationMethod>,
        k: u32,
    ) -> Self {
        Self {
            plots,
            realizations,
            method_names: methods.iter().map(|m| m.code().to_string()).collect(),
            methods,
            k,
        }
    }

    pub fn realizations(&self) -> &[Composite] {
        &self.realizations
    }

    pub fn get_model(&self, method: OrdinationMethod) -> OrdinationModel {
        OrdinationModel::new(method, self.k)
    }

    /// Every plot is its own location.
    pub fn colocation(&self) -> Colocation {
        Colocation::from_plots(&self.plots.plots.collection, &self.plots.plots.nn_id_field)
    }

    /// Signature rows usable with `composite`: those whose first band is not null.
    ///
    /// Only the first band is inspected; rows with a null in any later band pass.
    pub fn preflight(&self, composite: &Composite) -> Result<FeatureCollection, ModelError> {
        let first = composite.first_band().ok_or(ModelError::NoCovariateBands {
            method: self.method_names.join(","),
        })?;
        Ok(self.plots.env_fc.filter(Filter::neq(first, Expr::null())))
    }

    pub fn train_model(
        &self,
        model: &OrdinationModel,
        env_fc: &FeatureCollection,
        env_columns: &[String],
    ) -> Result<TrainedModel, ModelError> {
        model.train(
            env_fc,
            &self.plots.plots.nn_id_field,
            &self.plots.plots.species_fields,
            env_columns,
        )
    }

    fn trained_for(
        &self,
        method: OrdinationMethod,
        env_fc: &FeatureCollection,
        composite: &Composite,
        target: &str,
    ) -> Result<TrainedModel, ModelError> {
        let model = self.get_model(method);
        let trained = self.train_model(&model, env_fc, &composite.band_names())?;
        ModelApplied {
            method: method.code(),
            k: self.k,
            env_columns: trained.env_columns.len(),
            target,
        }
        .log();
        Ok(trained)
    }

    /// Predict `composite` with every method, in configured order.
    pub fn run_realization(&self, composite: &Composite) -> Result<Vec<ModelOutput>, ModelError> {
        let realization = composite.realization.unwrap_or(1);
        let started = RealizationRunStarted {
            year: composite.year,
            realization,
            methods: &self.method_names,
            mode: "image",
        };
        let span = started.span("run_realization");
        let _guard = span.enter();
        started.log();

        let env_fc = self.preflight(composite)?;
        self.methods
            .iter()
            .map(|method| {
                let trained = self.trained_for(*method, &env_fc, composite, "image")?;
                let image = trained
                    .predict(&composite.image)
                    .copy_properties(&composite.image)
                    .set(ORDINATION_METHOD_PROPERTY, Expr::constant(method.code()));
                Ok(ModelOutput {
                    year: composite.year,
                    realization,
                    method: *method,
                    image,
                })
            })
            .collect()
    }

    /// Every realization, realization-major then method.
    pub fn run_models(&self) -> Result<Vec<ModelOutput>, ModelError> {
        let mut outputs = Vec::with_capacity(self.realizations.len() * self.methods.len());
        for composite in &self.realizations {
            outputs.extend(self.run_realization(composite)?);
        }
        Ok(outputs)
    }

    pub fn run_first_model(&self) -> Result<Vec<ModelOutput>, ModelError> {
        let first = self.realizations.first().ok_or(ModelError::NoRealizations)?;
        self.run_realization(first)
    }

    /// Predict the signature table with every method.
    pub fn run_realization_fc(
        &self,
        composite: &Composite,
        colocation: Option<&Colocation>,
    ) -> Result<Vec<AccuracyOutput>, ModelError> {
        let realization = composite.realization.unwrap_or(1);
        let started = RealizationRunStarted {
            year: composite.year,
            realization,
            methods: &self.method_names,
            mode: "table",
        };
        let span = started.span("run_realization_fc");
        let _guard = span.enter();
        started.log();

        let env_fc = self.preflight(composite)?;
        self.methods
            .iter()
            .map(|method| {
                let trained = self.trained_for(*method, &env_fc, composite, "table")?;
                Ok(AccuracyOutput {
                    year: composite.year,
                    realization,
                    method: *method,
                    table: trained.predict_fc(&env_fc, colocation),
                })
            })
            .collect()
    }

    /// One list per realization, all sharing a single colocation object.
    pub fn run_models_fc(&self) -> Result<Vec<Vec<AccuracyOutput>>, ModelError> {
        let colocation = self.colocation();
        self.realizations
            .iter()
            .map(|composite| self.run_realization_fc(composite, Some(&colocation)))
            .collect()
    }

    pub fn run_first_model_fc(&self) -> Result<Vec<AccuracyOutput>, ModelError> {
        let first = self.realizations.first().ok_or(ModelError::NoRealizations)?;
        let colocation = self.colocation();
        self.run_realization_fc(first, Some(&colocation))
    }
}
