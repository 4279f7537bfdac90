// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod config;
mod model;
mod platform;
mod run;

pub use config::{ConfigError, ValidationError};
pub use model::ModelError;
pub use platform::PlatformError;
pub use run::RunError;
