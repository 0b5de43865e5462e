use serde_json::Value;

/// One leaf condition on a physical column
///
/// Leaves are kept in a list, not a map: two input keys that resolve to the same
/// column (`owner` and `owner_id`, an alias and its column) both stay in the
/// predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCondition {
    /// Bare column of the base table, or `reference.column` for an associated table
    pub key: String,
    pub value: Value,
    /// Entity type that declares the column
    pub entity: String,
}

impl ResolvedCondition {
    pub fn new(key: impl Into<String>, value: Value, entity: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value,
            entity: entity.into(),
        }
    }
}
