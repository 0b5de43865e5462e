//! Integration tests for lazy relation construction

mod common;

use authz_sql::{AuthzSqlError, ConditionMap};
use common::widget_adapter;
use serde_json::json;

#[test]
fn test_join_is_forced_for_eager_loaded_association() {
    let adapter = widget_adapter();
    let relation = adapter
        .build_relation(&ConditionMap::new().with("status", "x"), &["owner"])
        .unwrap();

    assert!(relation.is_eager_loading());
    assert_eq!(relation.eager_loads(), ["owner".to_string()]);
    assert_eq!(relation.referenced_associations(), ["owner".to_string()]);
    assert_eq!(
        relation.build_sql(),
        concat!(
            r#"SELECT "widgets".* FROM "widgets" "#,
            r#"LEFT OUTER JOIN "users" ON "users"."id" = "widgets"."owner_id" "#,
            r#"WHERE ("widgets"."status" = 'x')"#
        )
    );
}

#[test]
fn test_no_joins_means_no_references() {
    let adapter = widget_adapter();
    let relation = adapter
        .build_relation::<&str>(&ConditionMap::new().with("status", "x"), &[])
        .unwrap();

    assert!(!relation.is_eager_loading());
    assert!(relation.joins().is_empty());
    assert!(relation.referenced_associations().is_empty());
    assert_eq!(relation.where_clauses(), [r#""widgets"."status" = 'x'"#.to_string()]);
}

#[test]
fn test_association_conditions_filter_through_join() {
    let adapter = widget_adapter();
    let relation = adapter
        .build_relation(
            &ConditionMap::new().with("owner", json!({"login": "ana"})),
            &["owner", "parts"],
        )
        .unwrap();

    let sql = relation.build_sql();
    assert!(sql.contains(r#"LEFT OUTER JOIN "users" ON "users"."id" = "widgets"."owner_id""#));
    assert!(sql.contains(r#"LEFT OUTER JOIN "parts" ON "parts"."widget_id" = "widgets"."id""#));
    assert!(sql.ends_with(r#"WHERE ("users"."name" = 'ana')"#));
}

#[test]
fn test_two_associations_on_same_table_are_aliased() {
    let adapter = widget_adapter();
    let relation = adapter
        .build_relation(
            &ConditionMap::new()
                .with("owner", json!({"name": "a"}))
                .with("creator", json!({"name": "b"})),
            &["owner", "creator"],
        )
        .unwrap();

    assert_eq!(
        relation.build_sql(),
        concat!(
            r#"SELECT "widgets".* FROM "widgets" "#,
            r#"LEFT OUTER JOIN "users" ON "users"."id" = "widgets"."owner_id" "#,
            r#"LEFT OUTER JOIN "users" "creator_users" ON "creator_users"."id" = "widgets"."creator_id" "#,
            r#"WHERE ("users"."name" = 'a' AND "creator_users"."name" = 'b')"#
        )
    );
}

#[test]
fn test_duplicate_join_names_collapse() {
    let adapter = widget_adapter();
    let relation = adapter
        .build_relation(&ConditionMap::new(), &["owner", "owner"])
        .unwrap();

    assert_eq!(relation.joins().len(), 1);
    assert_eq!(relation.eager_loads().len(), 1);
    assert!(relation.where_clauses().is_empty());
}

#[test]
fn test_unknown_association_fails() {
    let adapter = widget_adapter();
    let err = adapter
        .build_relation(&ConditionMap::new(), &["gizmos"])
        .unwrap_err();
    assert!(err.is_condition_error());
    assert!(matches!(err, AuthzSqlError::InvalidCondition { ref key, .. } if key == "gizmos"));
}

#[test]
fn test_compilation_errors_propagate() {
    let adapter = widget_adapter();
    let result = adapter.build_relation(&ConditionMap::new().with("state", "melted"), &["owner"]);
    assert!(matches!(result, Err(AuthzSqlError::InvalidCondition { .. })));
}
