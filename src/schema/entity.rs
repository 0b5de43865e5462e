//! Entity type metadata: table, columns, associations, aliases, aggregations, enums.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Aggregation, Association, Column, ColumnType, EnumDefinition, EnumRegistry};

/// Immutable description of one entity type backed by a table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityType {
    pub name: String,
    pub table_name: String,
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub associations: Vec<Association>,
    /// Alias → physical column
    #[serde(default)]
    pub attribute_aliases: BTreeMap<String, String>,
    #[serde(default)]
    pub aggregations: Vec<Aggregation>,
    #[serde(default)]
    pub enums: EnumRegistry,
}

impl EntityType {
    pub fn new(name: impl Into<String>, table_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table_name: table_name.into(),
            columns: Vec::new(),
            associations: Vec::new(),
            attribute_aliases: BTreeMap::new(),
            aggregations: Vec::new(),
            enums: EnumRegistry::new(),
        }
    }

    pub fn column(mut self, name: impl Into<String>, column_type: ColumnType) -> Self {
        self.columns.push(Column::new(name, column_type));
        self
    }

    pub fn association(mut self, association: Association) -> Self {
        self.associations.push(association);
        self
    }

    pub fn alias(mut self, alias: impl Into<String>, column: impl Into<String>) -> Self {
        self.attribute_aliases.insert(alias.into(), column.into());
        self
    }

    pub fn aggregation(mut self, aggregation: Aggregation) -> Self {
        self.aggregations.push(aggregation);
        self
    }

    /// Register an enum-backed attribute; the attribute is expected to be an integer column
    pub fn enum_attribute(mut self, attribute: impl Into<String>, definition: EnumDefinition) -> Self {
        self.enums.register(attribute, definition);
        self
    }

    pub fn find_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.find_column(name).is_some()
    }

    pub fn find_association(&self, name: &str) -> Option<&Association> {
        self.associations.iter().find(|assoc| assoc.name == name)
    }

    pub fn alias_target(&self, alias: &str) -> Option<&str> {
        self.attribute_aliases.get(alias).map(String::as_str)
    }

    pub fn find_aggregation(&self, name: &str) -> Option<&Aggregation> {
        self.aggregations.iter().find(|agg| agg.name == name)
    }
}
