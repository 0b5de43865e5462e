use serde_json::Value;
use tracing::warn;

use super::fragment::{CompiledFragment, PredicateSet};
use super::json_extractor::ConditionPartition;
use super::resolved::ResolvedCondition;
use crate::conditions::ValueShape;
use crate::constants::sql::JSON_KEY_OPERATOR;
use crate::error::{AuthzSqlError, Result};
use crate::query_builder::{quote_string, ColumnRef, PredicateNode};
use crate::schema::{EntityCatalog, EntityType, EnumDefinition};

/// Predicate construction and fragment emission for ordinary conditions
///
/// Implementations are selected at compile time through the compiler's type
/// parameter. Errors raised here reach the caller unchanged.
pub trait PredicateStrategy: Send + Sync {
    /// Build one predicate node per resolved leaf
    ///
    /// `entity` is the base entity; `catalog` describes the entities that
    /// qualified leaves belong to.
    fn build_from_conditions(
        &self,
        catalog: &EntityCatalog,
        entity: &EntityType,
        conditions: &[ResolvedCondition],
    ) -> Result<Vec<PredicateNode>>;

    /// Compile one node into an escaped SQL fragment
    fn compile(&self, node: &PredicateNode) -> Result<CompiledFragment>;
}

/// PostgreSQL predicate construction
///
/// Columns render as `"table"."column"`. Enum-backed attributes accept their
/// string labels, which are cast to integer codes using the metadata of the
/// entity that declares the column.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresPredicates;

impl PostgresPredicates {
    fn build_node(
        &self,
        catalog: &EntityCatalog,
        entity: &EntityType,
        leaf: &ResolvedCondition,
    ) -> Result<PredicateNode> {
        let key = leaf.key.as_str();
        let column = ColumnRef::from_key(key, &entity.table_name);
        let owner = if leaf.entity == entity.name {
            Some(entity)
        } else {
            catalog.get(&leaf.entity).map(|owner| &**owner)
        };
        let definition = owner.and_then(|owner| owner.enums.get(&column.column));
        let cast = |value: &Value| cast_enum_label(&leaf.entity, definition, key, value);

        match ValueShape::of(&leaf.value) {
            ValueShape::Scalar(scalar) => Ok(PredicateNode::eq(column, cast(scalar)?)),
            ValueShape::Collection(items) => {
                let values = items
                    .iter()
                    .map(|item| match item {
                        Value::Array(_) | Value::Object(_) => Err(AuthzSqlError::unsupported_value(
                            key,
                            "collection members must be scalars",
                        )),
                        scalar => cast(scalar),
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(PredicateNode::membership(column, values))
            }
            ValueShape::Nested(_) => Err(AuthzSqlError::unsupported_value(
                key,
                "nested map on a key that is not a column of this entity",
            )),
        }
    }
}

impl PredicateStrategy for PostgresPredicates {
    fn build_from_conditions(
        &self,
        catalog: &EntityCatalog,
        entity: &EntityType,
        conditions: &[ResolvedCondition],
    ) -> Result<Vec<PredicateNode>> {
        conditions
            .iter()
            .map(|leaf| self.build_node(catalog, entity, leaf))
            .collect()
    }

    fn compile(&self, node: &PredicateNode) -> Result<CompiledFragment> {
        node.to_sql().map(CompiledFragment::new)
    }
}

fn cast_enum_label(
    entity: &str,
    definition: Option<&EnumDefinition>,
    key: &str,
    value: &Value,
) -> Result<Value> {
    match (definition, value) {
        (Some(definition), Value::String(label)) => definition
            .code_for(label)
            .map(Value::from)
            .ok_or_else(|| {
                AuthzSqlError::invalid_condition(
                    entity,
                    key,
                    format!("unknown enum label '{label}'"),
                )
            }),
        _ => Ok(value.clone()),
    }
}

/// Compiles both buckets of a partition into fragments
pub struct PredicateBuilder<'a, S: PredicateStrategy> {
    entity: &'a EntityType,
    catalog: &'a EntityCatalog,
    strategy: &'a S,
}

impl<'a, S: PredicateStrategy> PredicateBuilder<'a, S> {
    pub fn new(entity: &'a EntityType, catalog: &'a EntityCatalog, strategy: &'a S) -> Self {
        Self {
            entity,
            catalog,
            strategy,
        }
    }

    pub fn build(&self, partition: &ConditionPartition) -> Result<PredicateSet> {
        let ordinary = self
            .strategy
            .build_from_conditions(self.catalog, self.entity, &partition.ordinary)?
            .iter()
            .map(|node| self.strategy.compile(node))
            .collect::<Result<Vec<_>>>()?;

        let json = partition
            .json
            .iter()
            .map(|leaf| self.json_fragment(&leaf.key, &leaf.value))
            .collect::<Result<Vec<_>>>()?;

        Ok(PredicateSet { ordinary, json })
    }

    /// `<table>.<column>->'<key>' = '<value>'` for the first pair of the nested map
    ///
    /// Additional pairs are ignored rather than combined.
    pub fn json_fragment(&self, column: &str, value: &Value) -> Result<CompiledFragment> {
        let Value::Object(nested) = value else {
            return Err(AuthzSqlError::unsupported_value(
                column,
                "JSON column condition needs a nested map",
            ));
        };
        let Some((key, key_value)) = nested.iter().next() else {
            return Err(AuthzSqlError::invalid_condition(
                &self.entity.name,
                column,
                "empty JSON condition",
            ));
        };

        if nested.len() > 1 {
            warn!(
                entity = %self.entity.name,
                column = %column,
                used_key = %key,
                ignored = nested.len() - 1,
                "JSON condition has several keys; only the first is compiled"
            );
        }

        Ok(CompiledFragment::new(format!(
            "{}.{}{}{} = {}",
            self.entity.table_name,
            column,
            JSON_KEY_OPERATOR,
            quote_string(key)?,
            quote_string(&json_value_text(key_value))?
        )))
    }
}

/// Text form of a JSON condition value
fn json_value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Association, ColumnType};
    use serde_json::json;

    fn widget() -> EntityType {
        EntityType::new("Widget", "widgets")
            .column("data", ColumnType::Jsonb)
            .column("status", ColumnType::Integer)
            .column("name", ColumnType::Text)
            .enum_attribute(
                "status",
                EnumDefinition::from_pairs([("active", 1), ("archived", 2)]),
            )
    }

    fn catalog() -> EntityCatalog {
        EntityCatalog::new()
            .with(
                EntityType::new("User", "users")
                    .column("id", ColumnType::BigInt)
                    .column("role", ColumnType::Integer)
                    .enum_attribute(
                        "role",
                        EnumDefinition::from_pairs([("member", 1), ("admin", 2)]),
                    ),
            )
            .with(widget().association(Association::belongs_to("owner", "User")))
    }

    fn ordinary(leaves: Vec<ResolvedCondition>) -> ConditionPartition {
        ConditionPartition {
            ordinary: leaves,
            json: Vec::new(),
        }
    }

    fn leaf(key: &str, value: Value) -> ResolvedCondition {
        ResolvedCondition::new(key, value, "Widget")
    }

    fn compile(entity: &EntityType, partition: ConditionPartition) -> Result<PredicateSet> {
        let catalog = catalog();
        PredicateBuilder::new(entity, &catalog, &PostgresPredicates).build(&partition)
    }

    fn fragment_builder<'a>(
        entity: &'a EntityType,
        catalog: &'a EntityCatalog,
    ) -> PredicateBuilder<'a, PostgresPredicates> {
        PredicateBuilder::new(entity, catalog, &PostgresPredicates)
    }

    #[test]
    fn test_json_fragment_literal() {
        let entity = widget();
        let catalog = catalog();
        let fragment = fragment_builder(&entity, &catalog)
            .json_fragment("data", &json!({"color": "red"}))
            .unwrap();
        assert_eq!(fragment.as_str(), "widgets.data->'color' = 'red'");
    }

    #[test]
    fn test_json_fragment_uses_first_pair_only() {
        let entity = widget();
        let catalog = catalog();
        let fragment = fragment_builder(&entity, &catalog)
            .json_fragment("data", &json!({"color": "red", "size": "L"}))
            .unwrap();
        assert_eq!(fragment.as_str(), "widgets.data->'color' = 'red'");
        assert!(!fragment.as_str().contains("size"));
    }

    #[test]
    fn test_json_fragment_escapes_key_and_value() {
        let entity = widget();
        let catalog = catalog();
        let fragment = fragment_builder(&entity, &catalog)
            .json_fragment("data", &json!({"it's": "o'k"}))
            .unwrap();
        assert_eq!(fragment.as_str(), "widgets.data->'it''s' = 'o''k'");
    }

    #[test]
    fn test_json_fragment_value_text() {
        let entity = widget();
        let catalog = catalog();
        let builder = fragment_builder(&entity, &catalog);
        assert_eq!(
            builder.json_fragment("data", &json!({"n": 5})).unwrap().as_str(),
            "widgets.data->'n' = '5'"
        );
        assert_eq!(
            builder.json_fragment("data", &json!({"n": null})).unwrap().as_str(),
            "widgets.data->'n' = ''"
        );
        assert!(builder.json_fragment("data", &json!({})).is_err());
    }

    #[test]
    fn test_enum_labels_cast_to_codes() {
        let entity = widget();
        let partition = ordinary(vec![
            leaf("status", json!("archived")),
            leaf("name", json!(["a", "b"])),
        ]);
        let set = compile(&entity, partition).unwrap();
        assert_eq!(set.ordinary[0].as_str(), r#""widgets"."status" = 2"#);
        assert_eq!(set.ordinary[1].as_str(), r#""widgets"."name" IN ('a', 'b')"#);
    }

    #[test]
    fn test_unknown_enum_label_is_invalid() {
        let entity = widget();
        let partition = ordinary(vec![leaf("status", json!("deleted"))]);
        assert!(matches!(
            compile(&entity, partition),
            Err(AuthzSqlError::InvalidCondition { .. })
        ));
    }

    #[test]
    fn test_nested_map_in_ordinary_bucket_is_unsupported() {
        let entity = widget();
        let partition = ordinary(vec![ResolvedCondition::new(
            "users.prefs",
            json!({"theme": "dark"}),
            "User",
        )]);
        assert_eq!(
            compile(&entity, partition).unwrap_err(),
            AuthzSqlError::unsupported_value(
                "users.prefs",
                "nested map on a key that is not a column of this entity"
            )
        );
    }

    #[test]
    fn test_associated_enum_labels_cast_with_their_entity() {
        let entity = widget();
        let partition = ordinary(vec![
            ResolvedCondition::new("users.role", json!("admin"), "User"),
            ResolvedCondition::new("creator_users.role", json!(["member", null]), "User"),
        ]);
        let set = compile(&entity, partition).unwrap();
        assert_eq!(set.ordinary[0].as_str(), r#""users"."role" = 2"#);
        assert_eq!(
            set.ordinary[1].as_str(),
            r#"("creator_users"."role" IN (1) OR "creator_users"."role" IS NULL)"#
        );
    }

    #[test]
    fn test_unknown_associated_enum_label_names_its_entity() {
        let entity = widget();
        let partition = ordinary(vec![ResolvedCondition::new("users.role", json!("root"), "User")]);
        assert_eq!(
            compile(&entity, partition).unwrap_err(),
            AuthzSqlError::invalid_condition("User", "users.role", "unknown enum label 'root'")
        );
    }

    #[test]
    fn test_colliding_leaves_each_compile() {
        let entity = widget();
        let partition = ordinary(vec![leaf("name", json!("a")), leaf("name", json!("b"))]);
        let set = compile(&entity, partition).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.ordinary[1].as_str(), r#""widgets"."name" = 'b'"#);
    }
}
