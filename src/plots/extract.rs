// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Plot signature extraction.
//!
//! A signature is the mean of every covariate band over a buffered footprint around
//! the plot point. Plots are always sampled against the composite of their own
//! observation year.

use serde_json::Value;

use crate::config::consts::{EXTRACTION_TILE_SCALE, MAX_YEAR, MIN_YEAR};
use crate::covariates::{Composite, CompositeMode, Covariates};
use crate::errors::PlatformError;
use crate::observability::messages::covariates::PlotYearsResolved;
use crate::observability::messages::StructuredLog;
use crate::platform::{Expr, FeatureCollection, Filter, Image, Reducer};
use crate::traits::Session;

/// Merged signature table plus the composite used for each plot year, in year order.
#[derive(Debug, Clone, PartialEq)]
pub struct YearSignatures {
    pub collection: FeatureCollection,
    pub composites: Vec<Composite>,
}

/// Mean of `image` over a `radius` meter buffer around each feature of `plots`.
pub fn extract_signatures(
    plots: &FeatureCollection,
    image: &Image,
    radius: f64,
    scale: f64,
) -> FeatureCollection {
    let footprints = plots.map(|f| f.buffer(radius));
    image.reduce_regions(&footprints, Reducer::Mean, scale, EXTRACTION_TILE_SCALE)
}

/// Sorted distinct values of `year_field` across the plot table.
pub fn plot_years_expr(plots: &FeatureCollection, year_field: &str) -> Expr {
    let distinct = Expr::call("List.distinct", [("list", plots.aggregate_array(year_field))]);
    Expr::call("List.sort", [("list", distinct)])
}

/// Extract every plot against the composite built for its own year.
///
/// The plot years are resolved with one evaluation; everything else stays lazy.
pub async fn extract_matching_year_signatures(
    session: &dyn Session,
    plots: &FeatureCollection,
    covariates: &Covariates,
    year_field: &str,
    radius: f64,
    scale: f64,
    mode: CompositeMode,
) -> Result<YearSignatures, PlatformError> {
    let value = session.evaluate(&plot_years_expr(plots, year_field)).await?;
    let years = parse_years(&value)?;

    PlotYearsResolved {
        year_field,
        years: &years,
    }
    .log();

    let composites: Vec<Composite> = years
        .iter()
        .map(|year| covariates.composite_for_year(*year, mode))
        .collect();

    let per_year = years.iter().zip(&composites).map(|(year, composite)| {
        let subset = plots.filter(Filter::eq(year_field, Expr::constant(*year)));
        extract_signatures(&subset, &composite.image, radius, scale)
    });
    let collection = FeatureCollection::flatten_all(per_year);

    Ok(YearSignatures {
        collection,
        composites,
    })
}

/// Years arrive as JSON numbers, integral or not, and must be four-digit years.
fn parse_years(value: &Value) -> Result<Vec<i32>, PlatformError> {
    let items = value.as_array().ok_or_else(|| {
        PlatformError::UnexpectedResult(format!("expected a list of plot years, got {}", value))
    })?;

    items
        .iter()
        .map(|item| {
            let year = item
                .as_i64()
                .or_else(|| item.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
                .ok_or_else(|| {
                    PlatformError::UnexpectedResult(format!("plot year is not an integer: {}", item))
                })?;
            i32::try_from(year)
                .ok()
                .filter(|y| (MIN_YEAR..=MAX_YEAR).contains(y))
                .ok_or_else(|| {
                    PlatformError::UnexpectedResult(format!(
                        "plot year {} is outside {}..={}",
                        year, MIN_YEAR, MAX_YEAR
                    ))
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::stub::RecordingSession;
    use crate::config::fixtures::training_config;
    use crate::covariates::SeedSource;
    use serde_json::json;

    fn covariates() -> Covariates {
        Covariates::with_seeds(&training_config(), SeedSource::explicit(5))
    }

    #[test]
    fn test_extract_signatures_buffers_and_reduces() {
        let plots = FeatureCollection::load("t/plots");
        let image = Image::load("i/composite");
        let table = extract_signatures(&plots, &image, 15.0, 30.0);

        let expr = table.expr();
        assert_eq!(expr.function_name(), Some("Image.reduceRegions"));
        assert_eq!(expr.argument_value("scale"), Some(&Expr::constant(30.0)));
        assert_eq!(expr.argument_value("tileScale"), Some(&Expr::constant(16.0)));
        assert_eq!(expr.argument_value("reducer"), Some(&Reducer::Mean.into_expr()));

        let buffer = &expr.find_invocations("Feature.buffer")[0];
        assert_eq!(buffer.argument_value("distance"), Some(&Expr::constant(15.0)));
    }

    #[tokio::test]
    async fn test_two_plot_years_build_two_composites() {
        let session = RecordingSession::with_responses(vec![json!([2015, 2017])]);
        let plots = FeatureCollection::load("t/plots");
        let covariates = covariates();

        let signatures = extract_matching_year_signatures(
            &session,
            &plots,
            &covariates,
            "MEAS_YEAR",
            15.0,
            30.0,
            CompositeMode::Random,
        )
        .await
        .unwrap();

        assert_eq!(session.evaluated(), vec![plot_years_expr(&plots, "MEAS_YEAR")]);

        let years: Vec<i32> = signatures.composites.iter().map(|c| c.year).collect();
        assert_eq!(years, vec![2015, 2017]);

        let expected = FeatureCollection::flatten_all(
            signatures.composites.iter().map(|composite| {
                let subset =
                    plots.filter(Filter::eq("MEAS_YEAR", Expr::constant(composite.year)));
                extract_signatures(&subset, &composite.image, 15.0, 30.0)
            }),
        );
        assert_eq!(signatures.collection, expected);
    }

    #[tokio::test]
    async fn test_each_year_group_uses_only_its_composite() {
        let session = RecordingSession::with_responses(vec![json!([2015.0, 2017.0])]);
        let plots = FeatureCollection::load("t/plots");
        let signatures = extract_matching_year_signatures(
            &session,
            &plots,
            &covariates(),
            "MEAS_YEAR",
            15.0,
            30.0,
            CompositeMode::Static,
        )
        .await
        .unwrap();

        let reductions = signatures.collection.expr().find_invocations("Image.reduceRegions");
        assert_eq!(reductions.len(), 2);
        for (reduction, composite) in reductions.iter().zip(&signatures.composites) {
            assert_eq!(reduction.argument_value("image"), Some(composite.image.expr()));
            let filter = &reduction.find_invocations("Filter.equals")[0];
            assert_eq!(
                filter.argument_value("rightValue"),
                Some(&Expr::constant(composite.year))
            );
        }
    }

    #[tokio::test]
    async fn test_non_integer_year_is_rejected() {
        let session = RecordingSession::with_responses(vec![json!(["2015"])]);
        let result = extract_matching_year_signatures(
            &session,
            &FeatureCollection::load("t/plots"),
            &covariates(),
            "MEAS_YEAR",
            15.0,
            30.0,
            CompositeMode::Static,
        )
        .await;
        assert!(matches!(result, Err(PlatformError::UnexpectedResult(_))));
    }

    #[tokio::test]
    async fn test_out_of_range_plot_year_is_rejected() {
        for years in [json!([2015, 2147483647]), json!([0]), json!([10000]), json!([-1])] {
            let session = RecordingSession::with_responses(vec![years.clone()]);
            let result = extract_matching_year_signatures(
                &session,
                &FeatureCollection::load("t/plots"),
                &covariates(),
                "MEAS_YEAR",
                15.0,
                30.0,
                CompositeMode::Random,
            )
            .await;
            assert!(
                matches!(result, Err(PlatformError::UnexpectedResult(_))),
                "years {} should be rejected",
                years
            );
        }
    }
}
