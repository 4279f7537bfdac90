// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Shared test configuration built from `configs/training.yaml`.

use crate::config::{parse_config, Config, ConfigFormat};

const TRAINING_YAML: &str = include_str!("../../configs/training.yaml");

pub fn training_config() -> Config {
    parse_config(TRAINING_YAML, ConfigFormat::Yaml).expect("training.yaml parses")
}
