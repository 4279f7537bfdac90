// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Expression graph nodes for the remote geospatial platform.
//!
//! Every computation in this crate is described, never performed, locally. Builders
//! in [`crate::platform`] assemble a tree of [`Expr`] nodes which is serialized to the
//! platform's JSON value-node form and evaluated remotely by a
//! [`Session`](crate::traits::Session).
//!
//! # Wire Form
//!
//! ```text
//! {"functionInvocationValue": {
//!     "functionName": "Image.rename",
//!     "arguments": {
//!         "input": {"functionInvocationValue": {"functionName": "Image.load", ...}},
//!         "names": {"arrayValue": {"values": [{"constantValue": "tcc"}]}}
//!     }
//! }}
//! ```
//!
//! # Examples
//!
//! ```rust
//! use mekong_knn::platform::Expr;
//!
//! let expr = Expr::call("Image.load", [("id", Expr::constant("users/me/dem"))]);
//! let json = serde_json::to_value(&expr).unwrap();
//! assert_eq!(json["functionInvocationValue"]["functionName"], "Image.load");
//! ```

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// A single node of a remote expression graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr {
    #[serde(rename = "constantValue")]
    Constant(Value),

    #[serde(rename = "arrayValue")]
    Array { values: Vec<Expr> },

    #[serde(rename = "dictionaryValue")]
    Dictionary { values: BTreeMap<String, Expr> },

    #[serde(rename = "functionInvocationValue")]
    Invocation {
        #[serde(rename = "functionName")]
        function_name: String,
        arguments: BTreeMap<String, Expr>,
    },

    #[serde(rename = "functionDefinitionValue")]
    Definition {
        #[serde(rename = "argumentNames")]
        argument_names: Vec<String>,
        body: Box<Expr>,
    },

    #[serde(rename = "argumentReference")]
    ArgumentReference(String),
}

impl Expr {
    pub fn constant<V: Into<Value>>(value: V) -> Self {
        Expr::Constant(value.into())
    }

    pub fn null() -> Self {
        Expr::Constant(Value::Null)
    }

    pub fn array<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Expr>,
    {
        Expr::Array {
            values: values.into_iter().collect(),
        }
    }

    /// Array of string constants, used for band and column name lists.
    pub fn strings<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::array(values.into_iter().map(|s| Expr::constant(s.as_ref())))
    }

    pub fn dictionary<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Expr)>,
        K: Into<String>,
    {
        Expr::Dictionary {
            values: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Invoke a named platform algorithm with named arguments.
    pub fn call<I, K>(function_name: &str, arguments: I) -> Self
    where
        I: IntoIterator<Item = (K, Expr)>,
        K: Into<String>,
    {
        Expr::Invocation {
            function_name: function_name.to_string(),
            arguments: arguments.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// A single-argument function definition, as used by `Collection.map`.
    pub fn lambda(argument: &str, body: Expr) -> Self {
        Expr::Definition {
            argument_names: vec![argument.to_string()],
            body: Box::new(body),
        }
    }

    pub fn argument(name: &str) -> Self {
        Expr::ArgumentReference(name.to_string())
    }

    /// Name of the invoked function, if this node is an invocation.
    pub fn function_name(&self) -> Option<&str> {
        match self {
            Expr::Invocation { function_name, .. } => Some(function_name),
            _ => None,
        }
    }

    /// Named argument of an invocation node.
    pub fn argument_value(&self, name: &str) -> Option<&Expr> {
        match self {
            Expr::Invocation { arguments, .. } => arguments.get(name),
            _ => None,
        }
    }

    /// Depth-first search for every invocation of `function_name` in the graph.
    pub fn find_invocations<'a>(&'a self, function_name: &str) -> Vec<&'a Expr> {
        let mut found = Vec::new();
        self.collect_invocations(function_name, &mut found);
        found
    }

    fn collect_invocations<'a>(&'a self, function_name: &str, found: &mut Vec<&'a Expr>) {
        match self {
            Expr::Constant(_) | Expr::ArgumentReference(_) => {}
            Expr::Array { values } => {
                for v in values {
                    v.collect_invocations(function_name, found);
                }
            }
            Expr::Dictionary { values } => {
                for v in values.values() {
                    v.collect_invocations(function_name, found);
                }
            }
            Expr::Invocation {
                function_name: name,
                arguments,
            } => {
                if name == function_name {
                    found.push(self);
                }
                for v in arguments.values() {
                    v.collect_invocations(function_name, found);
                }
            }
            Expr::Definition { body, .. } => body.collect_invocations(function_name, found),
        }
    }
}

impl From<&str> for Expr {
    fn from(value: &str) -> Self {
        Expr::constant(value)
    }
}

impl From<String> for Expr {
    fn from(value: String) -> Self {
        Expr::constant(value)
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Expr::constant(value)
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Expr::constant(value)
    }
}

impl From<u64> for Expr {
    fn from(value: u64) -> Self {
        Expr::constant(value)
    }
}

/// Top-level envelope submitted to the platform: a value table plus the key of the
/// result node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Expression {
    pub result: String,
    pub values: BTreeMap<String, Expr>,
}

impl From<Expr> for Expression {
    fn from(root: Expr) -> Self {
        let mut values = BTreeMap::new();
        values.insert("0".to_string(), root);
        Self {
            result: "0".to_string(),
            values,
        }
    }
}

impl From<&Expr> for Expression {
    fn from(root: &Expr) -> Self {
        Expression::from(root.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_invocation_wire_form() {
        let expr = Expr::call(
            "Image.rename",
            [
                ("input", Expr::call("Image.load", [("id", Expr::constant("a/b"))])),
                ("names", Expr::strings(["tcc"])),
            ],
        );

        let json = serde_json::to_value(&expr).unwrap();
        assert_eq!(
            json,
            json!({
                "functionInvocationValue": {
                    "functionName": "Image.rename",
                    "arguments": {
                        "input": {"functionInvocationValue": {
                            "functionName": "Image.load",
                            "arguments": {"id": {"constantValue": "a/b"}}
                        }},
                        "names": {"arrayValue": {"values": [{"constantValue": "tcc"}]}}
                    }
                }
            })
        );
    }

    #[test]
    fn test_lambda_and_null_wire_form() {
        let expr = Expr::lambda("_MAPPING_VAR_0_0", Expr::argument("_MAPPING_VAR_0_0"));
        let json = serde_json::to_value(&expr).unwrap();
        assert_eq!(
            json["functionDefinitionValue"]["argumentNames"],
            json!(["_MAPPING_VAR_0_0"])
        );
        assert_eq!(
            json["functionDefinitionValue"]["body"],
            json!({"argumentReference": "_MAPPING_VAR_0_0"})
        );
        assert_eq!(serde_json::to_value(Expr::null()).unwrap(), json!({"constantValue": null}));
    }

    #[test]
    fn test_expression_envelope() {
        let expression = Expression::from(Expr::constant(1));
        let json = serde_json::to_value(&expression).unwrap();
        assert_eq!(json, json!({"result": "0", "values": {"0": {"constantValue": 1}}}));
    }

    #[test]
    fn test_find_invocations_descends_all_node_kinds() {
        let leaf = || Expr::call("Image.load", [("id", Expr::constant("x"))]);
        let expr = Expr::call(
            "Outer",
            [
                ("a", Expr::array([leaf()])),
                ("b", Expr::dictionary([("k", leaf())])),
                ("c", Expr::lambda("v", leaf())),
            ],
        );
        assert_eq!(expr.find_invocations("Image.load").len(), 3);
        assert_eq!(expr.find_invocations("Outer").len(), 1);
        assert!(expr.find_invocations("Missing").is_empty());
    }
}
