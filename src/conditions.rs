//! # Condition Maps
//!
//! Declarative attribute → value(s) structures describing a permission rule's
//! matching criteria.
//!
//! A condition map keeps insertion order, so compiling the same map twice always
//! yields the same SQL. Values take one of three shapes:
//!
//! - **scalar** (string, number, boolean, null): equality test
//! - **collection** (JSON array): membership test
//! - **nested map** (JSON object): association sub-condition or JSON key/value

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{AuthzSqlError, Result};

/// Ordered attribute → value condition set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConditionMap(Map<String, Value>);

/// Shape of a condition value, borrowed from the underlying JSON
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueShape<'a> {
    Scalar(&'a Value),
    Collection(&'a [Value]),
    Nested(&'a Map<String, Value>),
}

impl<'a> ValueShape<'a> {
    pub fn of(value: &'a Value) -> Self {
        match value {
            Value::Array(items) => ValueShape::Collection(items),
            Value::Object(map) => ValueShape::Nested(map),
            other => ValueShape::Scalar(other),
        }
    }
}

impl ConditionMap {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Build a condition map from a JSON object
    pub fn from_json(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(AuthzSqlError::invalid_condition(
                "conditions",
                "<root>",
                format!("expected a JSON object, got {other}"),
            )),
        }
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a condition; an existing key keeps its position and takes the new value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Value)> for ConditionMap {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
