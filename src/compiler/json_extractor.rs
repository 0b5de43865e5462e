use serde_json::Value;
use tracing::{debug, warn};

use super::resolved::ResolvedCondition;
use crate::conditions::ValueShape;
use crate::schema::EntityType;

/// Two-bucket split of the resolved condition leaves
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConditionPartition {
    pub ordinary: Vec<ResolvedCondition>,
    pub json: Vec<ResolvedCondition>,
}

impl ConditionPartition {
    pub fn len(&self) -> usize {
        self.ordinary.len() + self.json.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordinary.is_empty() && self.json.is_empty()
    }
}

/// Routes nested-map conditions on physical columns to the JSON bucket
///
/// An entry is a JSON condition iff its value is a nested map and its key is the
/// literal name of a physical column. Everything else is ordinary, including
/// nested maps under qualified or unknown keys; those fail later in predicate
/// construction.
#[derive(Debug, Clone, Copy)]
pub struct JsonConditionExtractor<'a> {
    entity: &'a EntityType,
}

impl<'a> JsonConditionExtractor<'a> {
    pub fn new(entity: &'a EntityType) -> Self {
        Self { entity }
    }

    pub fn is_json_condition(&self, key: &str, value: &Value) -> bool {
        matches!(ValueShape::of(value), ValueShape::Nested(_)) && self.entity.has_column(key)
    }

    pub fn partition(&self, conditions: Vec<ResolvedCondition>) -> ConditionPartition {
        let mut partition = ConditionPartition::default();

        for leaf in conditions {
            if self.is_json_condition(&leaf.key, &leaf.value) {
                self.check_column_type(&leaf.key);
                partition.json.push(leaf);
            } else {
                partition.ordinary.push(leaf);
            }
        }

        debug!(
            entity = %self.entity.name,
            ordinary = partition.ordinary.len(),
            json = partition.json.len(),
            "Partitioned conditions"
        );

        partition
    }

    fn check_column_type(&self, key: &str) {
        if let Some(column) = self.entity.find_column(key) {
            if !column.column_type.is_json() {
                warn!(
                    entity = %self.entity.name,
                    column = %key,
                    column_type = ?column.column_type,
                    "Nested map on a non-JSON column; compiling it as a JSON key lookup"
                );
            }
        }
    }
}
