use serde_json::Value;
use std::fmt;

use super::Subject;
use crate::schema::EntityType;

/// Per-entity-type policy for matching one condition against an instance
///
/// `entity` is `None` when the instance's type is not in the catalog; strategies
/// must then fall back to plain value comparison.
pub trait MatchingStrategy: Send + Sync + fmt::Debug {
    /// Whether this strategy replaces plain matching for the attribute
    fn overrides_condition_matching(&self, entity: Option<&EntityType>, attribute: &str) -> bool;

    fn matches_condition(
        &self,
        entity: Option<&EntityType>,
        subject: &dyn Subject,
        attribute: &str,
        target: &Value,
    ) -> bool;
}

/// Direct comparison of the stored value
///
/// A collection target is a membership test, anything else is equality.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScalarMatcher;

impl MatchingStrategy for ScalarMatcher {
    fn overrides_condition_matching(&self, _entity: Option<&EntityType>, _attribute: &str) -> bool {
        false
    }

    fn matches_condition(
        &self,
        _entity: Option<&EntityType>,
        subject: &dyn Subject,
        attribute: &str,
        target: &Value,
    ) -> bool {
        let stored = subject.read_attribute(attribute).unwrap_or(Value::Null);
        match target {
            Value::Array(items) => items.contains(&stored),
            other => &stored == other,
        }
    }
}
