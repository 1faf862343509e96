//! Provider-agnostic coin representation.
//!
//! Providers disagree on attribute names and value types, so a [`Coin`] is a
//! bag of JSON values rather than a fixed struct.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Symbol to coin mapping held by one provider.
pub type CoinMap = HashMap<String, Coin>;

/// The attributes a provider reports for one trading symbol.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Coin(Map<String, Value>);

impl Coin {
    pub fn new(attributes: Map<String, Value>) -> Self {
        Coin(attributes)
    }

    /// Builds a coin from a JSON value. Anything other than an object yields `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        value.as_object().map(|attrs| Coin(attrs.clone()))
    }

    pub fn get(&self, attr: &str) -> Option<&Value> {
        self.0.get(attr)
    }

    /// Numeric view of an attribute. Missing or non-numeric values are `NaN`.
    pub fn float_attr(&self, attr: &str) -> f64 {
        self.get(attr).map_or(f64::NAN, to_number)
    }
}

/// Coerces a JSON value to `f64`.
///
/// Numbers convert directly and strings are parsed after trimming. Everything
/// else, including strings that do not parse, becomes `NaN`.
pub fn to_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

/// Coerces a caller supplied fallback, using `0.0` when it is not numeric.
pub fn fallback_number(fallback: Option<&Value>) -> f64 {
    let n = fallback.map_or(f64::NAN, to_number);
    if n.is_nan() { 0.0 } else { n }
}
