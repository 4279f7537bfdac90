// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::ModelError;
use crate::observability::messages::model::UnknownMethodRejected;
use crate::observability::messages::StructuredLog;
use std::fmt;
use std::str::FromStr;

/// Nearest-neighbor ordination variants offered by the modeling library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrdinationMethod {
    /// Untransformed covariate space
    Raw,
    Euclidean,
    Mahalanobis,
    /// Most similar neighbor (canonical correlation)
    Msn,
    /// Gradient nearest neighbor (canonical correspondence)
    Gnn,
}

impl OrdinationMethod {
    pub const ALL: [OrdinationMethod; 5] = [
        OrdinationMethod::Raw,
        OrdinationMethod::Euclidean,
        OrdinationMethod::Mahalanobis,
        OrdinationMethod::Msn,
        OrdinationMethod::Gnn,
    ];

    /// Identifier used in config documents and by the modeling library.
    pub fn code(&self) -> &'static str {
        match self {
            OrdinationMethod::Raw => "RAW",
            OrdinationMethod::Euclidean => "EUC",
            OrdinationMethod::Mahalanobis => "MAH",
            OrdinationMethod::Msn => "MSN",
            OrdinationMethod::Gnn => "GNN",
        }
    }
}

impl FromStr for OrdinationMethod {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RAW" => Ok(OrdinationMethod::Raw),
            "EUC" => Ok(OrdinationMethod::Euclidean),
            "MAH" => Ok(OrdinationMethod::Mahalanobis),
            "MSN" => Ok(OrdinationMethod::Msn),
            "GNN" => Ok(OrdinationMethod::Gnn),
            other => Err(ModelError::UnknownMethod(other.to_string())),
        }
    }
}

/// Parse method identifiers in order, stopping at the first unknown one.
pub fn parse_methods<S: AsRef<str>>(codes: &[S]) -> Result<Vec<OrdinationMethod>, ModelError> {
    codes
        .iter()
        .map(|code| {
            let code = code.as_ref();
            code.parse::<OrdinationMethod>().inspect_err(|_| {
                UnknownMethodRejected { method: code }.log();
            })
        })
        .collect()
}

impl fmt::Display for OrdinationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
