// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Configuration validation.
//!
//! Runs after parsing and before any session with the remote platform exists. Checks
//! are independent and every failure is accumulated, so a user sees all problems in
//! one pass:
//!
//! 1. **Scalar parameters**: `k`, `p`, footprint radius and scale are positive, and
//!    every model year is a four-digit calendar year
//! 2. **Required text**: identifiers, field names and destinations are non-empty
//! 3. **Ordination methods**: every identifier is known, none repeats
//! 4. **Covariates**: at least one source, non-empty names and references, and a
//!    unique output band name for every source (location bands included)
//!
//! # Examples
//!
//! ```rust,no_run
//! use mekong_knn::config::{load_config, validate_config};
//!
//! let cfg = load_config("configs/training.yaml").unwrap();
//! if let Err(errors) = validate_config(&cfg) {
//!     for error in errors {
//!         eprintln!("{}", error);
//!     }
//! }
//! ```

use crate::config::consts::{MAX_YEAR, MIN_YEAR};
use crate::config::Config;
use crate::errors::ValidationError;
use crate::ordination::OrdinationMethod;
use std::collections::HashSet;
use std::str::FromStr;

/// Validates every part of a parsed configuration.
///
/// # Returns
///
/// * `Ok(())` - Configuration is usable
/// * `Err(Vec<ValidationError>)` - All problems found
pub fn validate_config(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    errors.extend(validate_parameters(config));
    errors.extend(validate_required_text(config));
    errors.extend(validate_methods(config));
    errors.extend(validate_covariates(config));

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_parameters(config: &Config) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if config.k == 0 {
        errors.push(ValidationError::InvalidNeighborCount { k: config.k });
    }
    if config.p == 0 {
        errors.push(ValidationError::InvalidEnsembleSize { p: config.p });
    }
    for year in &config.model_years {
        if !(MIN_YEAR..=MAX_YEAR).contains(year) {
            errors.push(ValidationError::InvalidModelYear { year: *year });
        }
    }
    for (field, value) in [
        ("footprint_radius", config.footprint_radius()),
        ("scale", config.scale()),
    ] {
        if !(value > 0.0) {
            errors.push(ValidationError::NonPositiveParameter { field, value });
        }
    }

    errors
}

fn validate_required_text(config: &Config) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let scalars = [
        ("plots", config.plots.as_str()),
        ("nn_id_field", config.nn_id_field.as_str()),
        ("year_field", config.year_field.as_str()),
        ("output_collection", config.output_collection.as_str()),
        ("output_fc_collection", config.output_fc_collection.as_str()),
    ];
    for (field, value) in scalars {
        if value.trim().is_empty() {
            errors.push(ValidationError::EmptyField { field });
        }
    }

    let lists = [
        ("methods", config.methods.is_empty()),
        ("species_fields", config.species_fields.is_empty()),
        ("model_years", config.model_years.is_empty()),
    ];
    for (field, empty) in lists {
        if empty {
            errors.push(ValidationError::EmptyField { field });
        }
    }

    errors
}

fn validate_methods(config: &Config) -> Vec<ValidationError> {
    let mut seen = HashSet::new();
    let mut errors = Vec::new();

    for method in &config.methods {
        if OrdinationMethod::from_str(method).is_err() {
            errors.push(ValidationError::UnknownOrdinationMethod {
                method: method.clone(),
            });
        } else if !seen.insert(method.as_str()) {
            errors.push(ValidationError::DuplicateOrdinationMethod {
                method: method.clone(),
            });
        }
    }

    errors
}

fn validate_covariates(config: &Config) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let c = &config.covariates;

    let sources: Vec<(&'static str, &str, Vec<&str>)> = c
        .realization_collections
        .iter()
        .map(|r| ("realization_collections", r.name.as_str(), vec![r.collection.as_str()]))
        .chain(c.uncertainty_collections.iter().map(|u| {
            (
                "uncertainty_collections",
                u.name.as_str(),
                vec![u.collection.as_str(), u.uncertainty_collection.as_str()],
            )
        }))
        .chain(
            c.yearly_collections
                .iter()
                .map(|y| ("yearly_collections", y.name.as_str(), vec![y.collection.as_str()])),
        )
        .chain(
            c.static_images
                .iter()
                .map(|s| ("static_images", s.name.as_str(), vec![s.image.as_str()])),
        )
        .collect();

    if sources.is_empty() {
        errors.push(ValidationError::NoCovariates);
    }

    for (group, name, references) in &sources {
        if name.trim().is_empty() {
            errors.push(ValidationError::EmptyCovariateName { group: *group });
        }
        if references.iter().any(|r| r.trim().is_empty()) {
            errors.push(ValidationError::EmptySourceReference {
                group: *group,
                name: name.to_string(),
            });
        }
    }

    let mut seen_bands = HashSet::new();
    for band in config.composite_band_names() {
        if !band.is_empty() && !seen_bands.insert(band.clone()) {
            errors.push(ValidationError::DuplicateBandName { name: band });
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        CovariatesConfig, PlatformConfig, RealizationCollectionConfig, StaticImageConfig,
        UncertaintyCollectionConfig, YearlyCollectionConfig,
    };

    fn valid_config() -> Config {
        Config {
            k: 5,
            p: 2,
            methods: vec!["RAW".to_string(), "GNN".to_string()],
            covariates: CovariatesConfig {
                realization_collections: vec![RealizationCollectionConfig {
                    name: "tcc".to_string(),
                    collection: "c/tcc".to_string(),
                }],
                uncertainty_collections: vec![UncertaintyCollectionConfig {
                    name: "height".to_string(),
                    collection: "c/height".to_string(),
                    uncertainty_collection: "c/height_sd".to_string(),
                }],
                yearly_collections: vec![YearlyCollectionConfig {
                    name: "ndvi".to_string(),
                    collection: "c/ndvi".to_string(),
                }],
                static_images: vec![StaticImageConfig {
                    name: "elevation".to_string(),
                    image: "i/dem".to_string(),
                }],
            },
            species_fields: vec!["TEAK".to_string()],
            categorical_fields: vec![],
            plots: "t/plots".to_string(),
            model_years: vec![2020],
            nn_id_field: "PLOT_ID".to_string(),
            year_field: "YEAR".to_string(),
            output_collection: "o/maps".to_string(),
            output_fc_collection: "o/fc".to_string(),
            output_accuracy_statistics: "o/stats".to_string(),
            seed: None,
            footprint_radius: None,
            scale: None,
            with_location: None,
            platform: PlatformConfig::default(),
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_validation_table_driven() {
        struct TestCase {
            name: &'static str,
            mutate: fn(&mut Config),
            expected: Vec<ValidationError>,
        }

        let test_cases = vec![
            TestCase {
                name: "zero neighbors",
                mutate: |c| c.k = 0,
                expected: vec![ValidationError::InvalidNeighborCount { k: 0 }],
            },
            TestCase {
                name: "zero realizations",
                mutate: |c| c.p = 0,
                expected: vec![ValidationError::InvalidEnsembleSize { p: 0 }],
            },
            TestCase {
                name: "negative radius",
                mutate: |c| c.footprint_radius = Some(-1.0),
                expected: vec![ValidationError::NonPositiveParameter {
                    field: "footprint_radius",
                    value: -1.0,
                }],
            },
            TestCase {
                name: "unknown method",
                mutate: |c| c.methods.push("KNN".to_string()),
                expected: vec![ValidationError::UnknownOrdinationMethod {
                    method: "KNN".to_string(),
                }],
            },
            TestCase {
                name: "duplicate method",
                mutate: |c| c.methods.push("RAW".to_string()),
                expected: vec![ValidationError::DuplicateOrdinationMethod {
                    method: "RAW".to_string(),
                }],
            },
            TestCase {
                name: "model year overflows date range",
                mutate: |c| c.model_years = vec![2020, i32::MAX],
                expected: vec![ValidationError::InvalidModelYear { year: i32::MAX }],
            },
            TestCase {
                name: "negative model year",
                mutate: |c| c.model_years = vec![-1],
                expected: vec![ValidationError::InvalidModelYear { year: -1 }],
            },
            TestCase {
                name: "empty model years",
                mutate: |c| c.model_years.clear(),
                expected: vec![ValidationError::EmptyField {
                    field: "model_years",
                }],
            },
            TestCase {
                name: "blank id field",
                mutate: |c| c.nn_id_field = " ".to_string(),
                expected: vec![ValidationError::EmptyField {
                    field: "nn_id_field",
                }],
            },
            TestCase {
                name: "duplicate band across groups",
                mutate: |c| c.covariates.static_images[0].name = "tcc".to_string(),
                expected: vec![ValidationError::DuplicateBandName {
                    name: "tcc".to_string(),
                }],
            },
            TestCase {
                name: "covariate collides with location band",
                mutate: |c| c.covariates.yearly_collections[0].name = "latitude".to_string(),
                expected: vec![ValidationError::DuplicateBandName {
                    name: "latitude".to_string(),
                }],
            },
            TestCase {
                name: "empty uncertainty reference",
                mutate: |c| c.covariates.uncertainty_collections[0].uncertainty_collection.clear(),
                expected: vec![ValidationError::EmptySourceReference {
                    group: "uncertainty_collections",
                    name: "height".to_string(),
                }],
            },
        ];

        for case in test_cases {
            let mut config = valid_config();
            (case.mutate)(&mut config);
            let errors = validate_config(&config).unwrap_err();
            assert_eq!(errors, case.expected, "case: {}", case.name);
        }
    }

    #[test]
    fn test_location_band_names_free_without_location() {
        let mut config = valid_config();
        config.with_location = Some(false);
        config.covariates.yearly_collections[0].name = "latitude".to_string();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_no_covariates() {
        let mut config = valid_config();
        config.covariates = CovariatesConfig {
            realization_collections: vec![],
            uncertainty_collections: vec![],
            yearly_collections: vec![],
            static_images: vec![],
        };
        config.with_location = Some(false);
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::NoCovariates]
        );
    }
}
