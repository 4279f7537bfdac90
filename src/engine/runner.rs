// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::Config;
use crate::covariates::{Composite, CompositeMode, Covariates};
use crate::engine::wrapper::{AccuracyOutput, ModelOutput, Wrapper};
use crate::errors::{ModelError, PlatformError, RunError};
use crate::observability::messages::export::{ExportFailed, ExportRequested, ExportSubmitted};
use crate::observability::messages::StructuredLog;
use crate::ordination::{parse_methods, OrdinationMethod};
use crate::platform::{ExportTask, Geometry, TaskId};
use crate::plots::{Plots, PlotsWithCovariates};
use crate::traits::Session;
use tracing::Instrument;

/// Drives a whole run: signatures, models for every model year, export submission.
///
/// The plot signature table is built once per run and shared by every model year.
/// Method identifiers are resolved at construction, before any remote call.
pub struct ImageRunner<'a> {
    config: &'a Config,
    session: &'a dyn Session,
    covariates: Covariates,
    methods: Vec<OrdinationMethod>,
}

impl<'a> ImageRunner<'a> {
    pub fn new(config: &'a Config, session: &'a dyn Session) -> Result<Self, ModelError> {
        Self::with_covariates(config, session, Covariates::new(config))
    }

    pub fn with_covariates(
        config: &'a Config,
        session: &'a dyn Session,
        covariates: Covariates,
    ) -> Result<Self, ModelError> {
        Ok(Self {
            config,
            session,
            covariates,
            methods: parse_methods(config.methods.as_slice())?,
        })
    }

    /// `p` random realizations for `model_year`.
    pub fn get_covariates(&self, model_year: i32) -> Vec<Composite> {
        self.covariates
            .realizations_for_year(model_year, self.config.p, CompositeMode::Random)
    }

    pub fn get_plots(&self) -> Plots {
        Plots::new(self.config)
    }

    pub async fn get_plots_with_covariates(&self) -> Result<PlotsWithCovariates, PlatformError> {
        PlotsWithCovariates::from_config(self.session, self.config, &self.covariates).await
    }

    pub fn get_wrapper<'p>(&self, plots: &'p PlotsWithCovariates, model_year: i32) -> Wrapper<'p> {
        Wrapper::with_methods(
            plots,
            self.get_covariates(model_year),
            self.methods.clone(),
            self.config.k,
        )
    }

    /// Every raster prediction, ordered by model year, realization, then method.
    pub async fn run_models(&self) -> Result<Vec<ModelOutput>, RunError> {
        let plots = self.get_plots_with_covariates().await?;
        let mut outputs = Vec::new();
        for year in &self.config.model_years {
            outputs.extend(self.get_wrapper(&plots, *year).run_models()?);
        }
        Ok(outputs)
    }

    /// Every table prediction, in the same order as [`ImageRunner::run_models`].
    pub async fn run_models_fc(&self) -> Result<Vec<AccuracyOutput>, RunError> {
        let plots = self.get_plots_with_covariates().await?;
        let mut outputs = Vec::new();
        for year in &self.config.model_years {
            let nested = self.get_wrapper(&plots, *year).run_models_fc()?;
            outputs.extend(nested.into_iter().flatten());
        }
        Ok(outputs)
    }

    /// Submit one image export per prediction, clipped to `region`.
    ///
    /// Jobs are not awaited; the first submission failure ends the run.
    pub async fn export_models(&self, region: &Geometry) -> Result<Vec<TaskId>, RunError> {
        let mut task_ids = Vec::new();
        for output in self.run_models().await? {
            let name = output.name();
            let asset_id = format!("{}/{}", self.config.output_collection, name);
            let image = output.image.clip(region);
            let task = ExportTask::image(&name, &asset_id, image, region.clone());
            task_ids.push(self.submit(&task).await?);
        }
        Ok(task_ids)
    }

    /// Submit one table export per plot-level prediction.
    pub async fn export_accuracy(&self) -> Result<Vec<TaskId>, RunError> {
        let mut task_ids = Vec::new();
        for output in self.run_models_fc().await? {
            let name = output.name();
            let asset_id = format!("{}/{}", self.config.output_fc_collection, name);
            let task = ExportTask::table(&name, &asset_id, output.table);
            task_ids.push(self.submit(&task).await?);
        }
        Ok(task_ids)
    }

    async fn submit(&self, task: &ExportTask) -> Result<TaskId, PlatformError> {
        let requested = ExportRequested {
            kind: task.kind(),
            description: &task.description,
            asset_id: &task.asset_id,
        };
        let span = requested.span("submit");

        async move {
            requested.log();
            self.dispatch(task).await
        }
        .instrument(span)
        .await
    }

    async fn dispatch(&self, task: &ExportTask) -> Result<TaskId, PlatformError> {
        match self.session.start_export(task).await {
            Ok(task_id) => {
                ExportSubmitted {
                    kind: task.kind(),
                    description: &task.description,
                    asset_id: &task.asset_id,
                    task_id: &task_id.0,
                }
                .log();
                Ok(task_id)
            }
            Err(e) => {
                ExportFailed {
                    description: &task.description,
                    error: &e,
                }
                .log();
                Err(e)
            }
        }
    }
}
