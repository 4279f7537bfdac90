// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;      // remote platform sessions
pub mod config;        // config loading + validation
pub mod covariates;    // composites and realization ensembles
pub mod engine;        // model wrapper and export runner
pub mod errors;        // error handling
pub mod observability;
pub mod ordination;    // nearest-neighbor model binding
pub mod platform;      // expression graph builders
pub mod plots;         // plot signatures
pub mod traits;        // session abstraction
