use serde_json::Value;
use tracing::trace;

use super::{MatchingStrategy, ScalarMatcher, Subject};
use crate::schema::{EnumDefinition, EntityType};

/// Enum-aware matching for attributes registered in the entity's enum registry
///
/// The stored label is translated to its integer code, which is then compared
/// with the target (or tested for membership when the target is a collection).
/// Unregistered attributes fall back to [`ScalarMatcher`].
#[derive(Debug, Clone, Copy, Default)]
pub struct EnumAttributeMatcher;

impl EnumAttributeMatcher {
    pub fn uses_enum_matching(entity: &EntityType, attribute: &str) -> bool {
        entity.enums.contains(attribute)
    }

    /// Integer code of the subject's stored label, if it has one
    fn stored_code(definition: &EnumDefinition, subject: &dyn Subject, attribute: &str) -> Option<i64> {
        match subject.read_attribute(attribute)? {
            Value::String(label) => definition.code_for(&label),
            _ => None,
        }
    }
}

/// Numbers compare by value, so `1`, `1.0` and `1u64` all match code 1
#[allow(clippy::cast_precision_loss, clippy::float_cmp)]
fn code_matches(code: Option<i64>, target: &Value) -> bool {
    match (code, target.as_i64()) {
        (Some(code), Some(target)) => target == code,
        (Some(code), None) => target.as_f64().is_some_and(|target| target == code as f64),
        (None, _) => target.is_null(),
    }
}

impl MatchingStrategy for EnumAttributeMatcher {
    fn overrides_condition_matching(&self, entity: Option<&EntityType>, attribute: &str) -> bool {
        entity.is_some_and(|entity| Self::uses_enum_matching(entity, attribute))
    }

    fn matches_condition(
        &self,
        entity: Option<&EntityType>,
        subject: &dyn Subject,
        attribute: &str,
        target: &Value,
    ) -> bool {
        let Some(definition) = entity.and_then(|entity| entity.enums.get(attribute)) else {
            return ScalarMatcher.matches_condition(entity, subject, attribute, target);
        };

        let code = Self::stored_code(definition, subject, attribute);
        trace!(attribute = %attribute, code = ?code, "Matching enum attribute");

        match target {
            Value::Array(items) => items.iter().any(|item| code_matches(code, item)),
            other => code_matches(code, other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::Record;
    use crate::schema::ColumnType;
    use serde_json::json;

    fn widget() -> EntityType {
        EntityType::new("Widget", "widgets")
            .column("state", ColumnType::Integer)
            .column("name", ColumnType::Text)
            .enum_attribute(
                "state",
                EnumDefinition::from_pairs([("active", 1), ("archived", 2)]),
            )
    }

    fn matches(subject: &Record, attribute: &str, target: Value) -> bool {
        let entity = widget();
        EnumAttributeMatcher.matches_condition(Some(&entity), subject, attribute, &target)
    }

    #[test]
    fn test_uses_enum_matching() {
        let entity = widget();
        assert!(EnumAttributeMatcher::uses_enum_matching(&entity, "state"));
        assert!(!EnumAttributeMatcher::uses_enum_matching(&entity, "name"));
    }

    #[test]
    fn test_label_translated_to_code() {
        let subject = Record::new("Widget").with("state", "active");
        assert!(matches(&subject, "state", json!(1)));
        assert!(matches(&subject, "state", json!([1, 3])));
        assert!(!matches(&subject, "state", json!(2)));
        assert!(!matches(&subject, "state", json!([2, 3])));
    }

    #[test]
    fn test_float_target_compares_by_value() {
        let subject = Record::new("Widget").with("state", "active");
        assert!(matches(&subject, "state", json!(1.0)));
        assert!(matches(&subject, "state", json!([2, 1.0])));
        assert!(!matches(&subject, "state", json!(1.5)));
        assert!(!matches(&subject, "state", json!("1")));
    }

    #[test]
    fn test_unknown_label_matches_only_null() {
        let subject = Record::new("Widget").with("state", "deleted");
        assert!(!matches(&subject, "state", json!(1)));
        assert!(matches(&subject, "state", Value::Null));
        assert!(matches(&subject, "state", json!([2, null])));
    }

    #[test]
    fn test_unregistered_attribute_uses_scalar_equality() {
        let subject = Record::new("Widget").with("name", "gear");
        assert!(matches(&subject, "name", json!("gear")));
        assert!(!matches(&subject, "name", json!("cog")));
    }

    #[test]
    fn test_unknown_entity_falls_back() {
        let subject = Record::new("Ghost").with("state", "active");
        assert!(EnumAttributeMatcher.matches_condition(None, &subject, "state", &json!("active")));
        assert!(!EnumAttributeMatcher.overrides_condition_matching(None, "state"));
    }
}
