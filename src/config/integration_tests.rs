// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

#[cfg(test)]
mod integration_tests {
    use crate::config::{load_and_validate_config, validate_config};
    use crate::errors::{ConfigError, ValidationError};
    use std::fs;

    /// Test that the sample training configuration loads and validates
    #[test]
    fn test_training_yaml_loading() {
        let config = load_and_validate_config("configs/training.yaml").unwrap();

        assert_eq!(config.k, 5);
        assert_eq!(config.p, 2);
        assert_eq!(config.methods, vec!["RAW", "MSN"]);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.model_years, vec![2020]);
        assert_eq!(config.covariates.realization_collections[0].name, "tcc");
        assert_eq!(
            config.covariates.uncertainty_collections[0].uncertainty_collection,
            "projects/servir-mekong/canopy_height_sd"
        );
        assert_eq!(
            config.composite_band_names(),
            vec!["tcc", "canopy_height", "ndvi", "elevation", "longitude", "latitude"]
        );
    }

    /// Dropping any required key stops loading before anything else happens
    #[test]
    fn test_missing_required_fields_fail_loading() {
        let original = fs::read_to_string("configs/training.yaml").unwrap();
        let dir = tempfile::tempdir().unwrap();

        for key in ["k:", "methods:", "plots:", "year_field:", "output_collection:"] {
            let stripped: String = original
                .lines()
                .filter(|line| !line.starts_with(key))
                .map(|line| format!("{}\n", line))
                .collect();
            let path = dir.path().join("stripped.yaml");
            fs::write(&path, stripped).unwrap();

            let result = load_and_validate_config(&path);
            assert!(
                matches!(result, Err(ConfigError::Yaml(_))),
                "removing '{}' should fail to parse",
                key
            );
        }
    }

    /// A location band name collides with a configured covariate
    #[test]
    fn test_reserved_location_band_name_collides() {
        let mut config = load_and_validate_config("configs/training.yaml").unwrap();
        config.covariates.static_images[0].name = "latitude".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::DuplicateBandName {
                name: "latitude".to_string()
            }]
        );

        config.with_location = Some(false);
        assert!(validate_config(&config).is_ok());
    }
}
