//! Raw form submissions
//!
//! A `FormData` is whatever the browser (or API client) posted, before any
//! validation. Values are kept as strings, in submission order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Field names the invoice forms submit
pub mod fields {
    pub const CUSTOMER_ID: &str = "customerId";
    pub const AMOUNT: &str = "amount";
    pub const STATUS: &str = "status";
}

/// Untyped field name -> raw value mapping from a form submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormData(IndexMap<String, String>);

impl FormData {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Builder-style insert, mostly for tests and demos
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert a field; a repeated field keeps its last value
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Build from a JSON object
    ///
    /// Strings are taken as-is, numbers and booleans are stringified, and
    /// `null` is treated as an absent field. Nested values are rejected.
    pub fn from_json(value: Value) -> Result<Self, String> {
        let Value::Object(map) = value else {
            return Err("expected a JSON object of form fields".to_string());
        };

        let mut form = FormData::new();
        for (name, value) in map {
            match value {
                Value::Null => {}
                Value::String(s) => form.insert(name, s),
                Value::Number(n) => form.insert(name, n.to_string()),
                Value::Bool(b) => form.insert(name, b.to_string()),
                Value::Array(_) | Value::Object(_) => {
                    return Err(format!("field '{}' must be a scalar value", name));
                }
            }
        }
        Ok(form)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut form = FormData::new();
        for (name, value) in iter {
            form.insert(name, value);
        }
        form
    }
}
