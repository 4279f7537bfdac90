// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Typed builders for vector (feature table) expressions.

use crate::platform::Expr;

/// Argument name bound by the function passed to `Collection.map`.
pub const MAPPING_VAR: &str = "_MAPPING_VAR_0_0";

/// Lazy reference to one feature, usually the bound argument of a map function.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature(Expr);

impl Feature {
    pub fn from_expr(expr: Expr) -> Self {
        Self(expr)
    }

    pub fn expr(&self) -> &Expr {
        &self.0
    }

    pub fn into_expr(self) -> Expr {
        self.0
    }

    /// Replace the geometry with a buffer of `distance` meters.
    pub fn buffer(&self, distance: f64) -> Self {
        Self(Expr::call(
            "Feature.buffer",
            [("feature", self.0.clone()), ("distance", Expr::constant(distance))],
        ))
    }

    pub fn get(&self, property: &str) -> Expr {
        Expr::call(
            "Element.get",
            [("object", self.0.clone()), ("property", Expr::constant(property))],
        )
    }

    pub fn set(&self, key: &str, value: Expr) -> Self {
        Self(Expr::call(
            "Element.set",
            [
                ("object", self.0.clone()),
                ("key", Expr::constant(key)),
                ("value", value),
            ],
        ))
    }
}

/// Lazy reference to a remote feature table.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureCollection(Expr);

impl FeatureCollection {
    pub fn from_expr(expr: Expr) -> Self {
        Self(expr)
    }

    pub fn expr(&self) -> &Expr {
        &self.0
    }

    pub fn into_expr(self) -> Expr {
        self.0
    }

    pub fn load(table_id: &str) -> Self {
        Self(Expr::call(
            "Collection.loadTable",
            [("tableId", Expr::constant(table_id))],
        ))
    }

    /// Apply `f` to every feature remotely.
    pub fn map<F>(&self, f: F) -> Self
    where
        F: FnOnce(Feature) -> Feature,
    {
        let body = f(Feature(Expr::argument(MAPPING_VAR))).into_expr();
        Self(Expr::call(
            "Collection.map",
            [
                ("collection", self.0.clone()),
                ("baseAlgorithm", Expr::lambda(MAPPING_VAR, body)),
            ],
        ))
    }

    pub fn filter(&self, filter: Filter) -> Self {
        Self(Expr::call(
            "Collection.filter",
            [("collection", self.0.clone()), ("filter", filter.into_expr())],
        ))
    }

    /// Values of `property` across all features, in table order.
    pub fn aggregate_array(&self, property: &str) -> Expr {
        Expr::call(
            "AggregateFeatureCollection.array",
            [
                ("collection", self.0.clone()),
                ("property", Expr::constant(property)),
            ],
        )
    }

    /// Concatenate several tables into one, preserving the given order.
    pub fn flatten_all<I>(collections: I) -> Self
    where
        I: IntoIterator<Item = FeatureCollection>,
    {
        let nested = Expr::call(
            "Collection",
            [(
                "features",
                Expr::array(collections.into_iter().map(FeatureCollection::into_expr)),
            )],
        );
        Self(Expr::call("Collection.flatten", [("collection", nested)]))
    }
}

/// Row predicate for `Collection.filter`.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter(Expr);

impl Filter {
    pub fn into_expr(self) -> Expr {
        self.0
    }

    pub fn expr(&self) -> &Expr {
        &self.0
    }

    pub fn eq(field: &str, value: Expr) -> Self {
        Self(Expr::call(
            "Filter.equals",
            [("leftField", Expr::constant(field)), ("rightValue", value)],
        ))
    }

    /// Rows where `field` differs from `value`; with a null value this keeps rows
    /// whose property is present and non-null.
    pub fn neq(field: &str, value: Expr) -> Self {
        Self(Expr::call(
            "Filter.notEquals",
            [("leftField", Expr::constant(field)), ("rightValue", value)],
        ))
    }

    pub fn date_range_contains(range: Expr, field: &str) -> Self {
        Self(Expr::call(
            "Filter.dateRangeContains",
            [("leftValue", range), ("rightField", Expr::constant(field))],
        ))
    }
}

/// Lazy geometry reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry(Expr);

impl Geometry {
    pub fn expr(&self) -> &Expr {
        &self.0
    }

    /// Axis-aligned rectangle `[xmin, ymin, xmax, ymax]` in degrees.
    pub fn rectangle(bounds: [f64; 4]) -> Self {
        Self(Expr::call(
            "GeometryConstructors.Rectangle",
            [
                ("coordinates", Expr::array(bounds.iter().map(|c| Expr::constant(*c)))),
                ("geodesic", Expr::constant(false)),
            ],
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_binds_body_to_mapping_variable() {
        let fc = FeatureCollection::load("users/me/plots").map(|f| f.buffer(15.0));
        let definition = fc.expr().argument_value("baseAlgorithm").unwrap();
        match definition {
            Expr::Definition {
                argument_names,
                body,
            } => {
                assert_eq!(argument_names, &vec![MAPPING_VAR.to_string()]);
                assert_eq!(body.function_name(), Some("Feature.buffer"));
                assert_eq!(body.argument_value("feature"), Some(&Expr::argument(MAPPING_VAR)));
                assert_eq!(body.argument_value("distance"), Some(&Expr::constant(15.0)));
            }
            other => panic!("expected function definition, got {:?}", other),
        }
    }

    #[test]
    fn test_flatten_all_preserves_order() {
        let a = FeatureCollection::load("a");
        let b = FeatureCollection::load("b");
        let merged = FeatureCollection::flatten_all(vec![a.clone(), b.clone()]);
        let nested = merged.expr().argument_value("collection").unwrap();
        assert_eq!(
            nested.argument_value("features"),
            Some(&Expr::array([a.into_expr(), b.into_expr()]))
        );
    }
}
