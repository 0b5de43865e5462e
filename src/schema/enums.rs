//! # Enum Definitions
//!
//! Enum-eligible attributes store an integer code and expose a string label.
//! Each entity type carries an [`EnumRegistry`] mapping attribute names to their
//! [`EnumDefinition`]; only registered attributes take part in enum-aware
//! matching and label casting.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Label → integer code mapping for one attribute
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnumDefinition {
    codes: BTreeMap<String, i64>,
}

impl EnumDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        Self {
            codes: pairs
                .into_iter()
                .map(|(label, code)| (label.into(), code))
                .collect(),
        }
    }

    pub fn value(mut self, label: impl Into<String>, code: i64) -> Self {
        self.codes.insert(label.into(), code);
        self
    }

    pub fn code_for(&self, label: &str) -> Option<i64> {
        self.codes.get(label).copied()
    }
}

/// Attribute name → enum definition, per entity type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnumRegistry {
    definitions: HashMap<String, EnumDefinition>,
}

impl EnumRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, attribute: impl Into<String>, definition: EnumDefinition) {
        self.definitions.insert(attribute.into(), definition);
    }

    pub fn contains(&self, attribute: &str) -> bool {
        self.definitions.contains_key(attribute)
    }

    pub fn get(&self, attribute: &str) -> Option<&EnumDefinition> {
        self.definitions.get(attribute)
    }
}
