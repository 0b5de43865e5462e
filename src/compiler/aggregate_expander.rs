use serde_json::Value;
use tracing::debug;

use super::resolved::ResolvedCondition;
use crate::conditions::ValueShape;
use crate::error::{AuthzSqlError, Result};
use crate::schema::{Aggregation, EntityType};

/// Expands virtual/aggregate attribute keys into conditions on their columns
#[derive(Debug, Clone, Copy)]
pub struct AggregateExpander<'a> {
    entity: &'a EntityType,
}

impl<'a> AggregateExpander<'a> {
    pub fn new(entity: &'a EntityType) -> Self {
        Self { entity }
    }

    /// Replace each aggregation key in place with its column conditions
    pub fn expand(&self, conditions: Vec<ResolvedCondition>) -> Result<Vec<ResolvedCondition>> {
        if self.entity.aggregations.is_empty() {
            return Ok(conditions);
        }

        let mut expanded = Vec::with_capacity(conditions.len());
        let mut aggregates = 0usize;

        for leaf in conditions {
            match self.entity.find_aggregation(&leaf.key) {
                Some(aggregation) => {
                    aggregates += 1;
                    self.expand_one(aggregation, leaf.value, &mut expanded)?;
                }
                None => expanded.push(leaf),
            }
        }

        if aggregates > 0 {
            debug!(
                entity = %self.entity.name,
                aggregates,
                expanded_keys = expanded.len(),
                "Expanded aggregate conditions"
            );
        }

        Ok(expanded)
    }

    fn expand_one(
        &self,
        aggregation: &Aggregation,
        value: Value,
        expanded: &mut Vec<ResolvedCondition>,
    ) -> Result<()> {
        let entity = self.entity.name.as_str();

        if let ValueShape::Nested(fields) = ValueShape::of(&value) {
            for (field, column) in &aggregation.mapping {
                let field_value = fields.get(field).cloned().unwrap_or(Value::Null);
                expanded.push(ResolvedCondition::new(column.as_str(), field_value, entity));
            }
            return Ok(());
        }

        match aggregation.single_column() {
            Some(column) => {
                expanded.push(ResolvedCondition::new(column, value, entity));
                Ok(())
            }
            None => Err(AuthzSqlError::invalid_condition(
                &self.entity.name,
                &aggregation.name,
                "multi-column aggregation needs a map of its fields",
            )),
        }
    }
}
