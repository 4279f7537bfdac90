// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::{ModelError, PlatformError};
use thiserror::Error;

/// Anything that can stop a model run once the configuration is accepted.
#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Platform(#[from] PlatformError),
}
