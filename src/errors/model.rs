// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Errors raised while instantiating or driving ordination models.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Unknown ordination method '{0}' (expected one of RAW, EUC, MAH, MSN, GNN)")]
    UnknownMethod(String),

    /// Training needs at least one environment column.
    #[error("Cannot train '{method}' without covariate bands")]
    NoCovariateBands { method: String },

    /// The wrapper was built without any realizations.
    #[error("No covariate realizations to run models against")]
    NoRealizations,
}
