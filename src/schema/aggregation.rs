//! Virtual attributes composed from several physical columns.

use serde::{Deserialize, Serialize};

/// A virtual attribute mapped onto one or more physical columns
///
/// Each mapping entry pairs a field of the composed value with the column that
/// stores it, e.g. `balance` → [("amount", "balance_amount"), ("currency", "balance_currency")].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aggregation {
    pub name: String,
    pub mapping: Vec<(String, String)>,
}

impl Aggregation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mapping: Vec::new(),
        }
    }

    pub fn map(mut self, field: impl Into<String>, column: impl Into<String>) -> Self {
        self.mapping.push((field.into(), column.into()));
        self
    }

    /// The single backing column, when the aggregation maps exactly one
    pub fn single_column(&self) -> Option<&str> {
        match self.mapping.as_slice() {
            [(_, column)] => Some(column.as_str()),
            _ => None,
        }
    }
}
