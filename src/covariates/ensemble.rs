// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::Config;
use crate::covariates::composite::{Composite, CompositeBuilder, CompositeMode};
use crate::covariates::seeds::SeedSource;
use crate::observability::messages::covariates::EnsembleGenerated;
use crate::observability::messages::StructuredLog;
use crate::platform::Expr;

/// Entry point for covariate composites of a run.
///
/// Holds one [`CompositeBuilder`] whose base seed is fixed at construction, so every
/// composite of the run derives its draws from the same origin.
#[derive(Debug, Clone)]
pub struct Covariates {
    builder: CompositeBuilder,
}

impl Covariates {
    /// Seeds from the config's `seed`, or the clock when absent.
    pub fn new(config: &Config) -> Self {
        Self::with_seeds(config, SeedSource::from_config(config.seed))
    }

    pub fn with_seeds(config: &Config, seeds: SeedSource) -> Self {
        Self {
            builder: CompositeBuilder::new(config, seeds),
        }
    }

    pub fn seeds(&self) -> SeedSource {
        self.builder.seeds()
    }

    pub fn builder(&self) -> &CompositeBuilder {
        &self.builder
    }

    /// A single composite outside any ensemble.
    ///
    /// Random draws are keyed as member 0, which no ensemble member uses.
    pub fn composite_for_year(&self, year: i32, mode: CompositeMode) -> Composite {
        match mode {
            CompositeMode::Random => Composite {
                realization: None,
                ..self.builder.random_image_for_year(year, 0)
            },
            CompositeMode::Static => self.builder.static_image_for_year(year),
        }
    }

    /// `num` random members for `year`, or one static member.
    ///
    /// Members are numbered from 1 and tagged remotely with `year` and `realization`.
    pub fn realizations_for_year(&self, year: i32, num: u32, mode: CompositeMode) -> Vec<Composite> {
        let count = match mode {
            CompositeMode::Random => num,
            CompositeMode::Static => 1,
        };

        let realizations: Vec<Composite> = (1..=count)
            .map(|r| {
                let composite = self.builder.build(year, mode, r);
                let image = composite
                    .image
                    .set("year", Expr::constant(year))
                    .set("realization", Expr::constant(r));
                Composite { image, ..composite }
            })
            .collect();

        EnsembleGenerated {
            year,
            mode: mode.as_str(),
            realizations: realizations.len(),
        }
        .log();

        realizations
    }
}
