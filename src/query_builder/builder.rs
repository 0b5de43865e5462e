use tracing::debug;

use super::{Join, Relation};
use crate::error::{AuthzSqlError, Result};
use crate::schema::{EntityCatalog, EntityType};

/// Applies a compiled condition set and eager-load associations to a base relation
///
/// Filtering on a joined table's columns needs the join to be present in the
/// main statement, which eager-loading alone does not guarantee. Every requested
/// association is therefore both eager-loaded and referenced. A table joined a
/// second time is aliased `<association>_<table>`, the same reference compiled
/// conditions use for it.
#[derive(Debug, Clone, Copy)]
pub struct RelationBuilder<'a> {
    entity: &'a EntityType,
    catalog: &'a EntityCatalog,
}

impl<'a> RelationBuilder<'a> {
    pub fn new(entity: &'a EntityType, catalog: &'a EntityCatalog) -> Self {
        Self { entity, catalog }
    }

    /// Build a lazy relation filtered by `predicate` with `join_names` eager-loaded
    pub fn build<S: AsRef<str>>(&self, predicate: &str, join_names: &[S]) -> Result<Relation> {
        let mut relation = Relation::new(&self.entity.table_name).where_sql(predicate);

        for name in join_names {
            let name = name.as_ref();
            let join = self.association_join(name)?;
            relation = relation.includes(name).references(name, join);
        }

        debug!(
            entity = %self.entity.name,
            joins = relation.joins().len(),
            filtered = !relation.where_clauses().is_empty(),
            "Built lazy relation"
        );

        Ok(relation)
    }

    fn association_join(&self, name: &str) -> Result<Join> {
        let association = self.entity.find_association(name).ok_or_else(|| {
            AuthzSqlError::invalid_condition(&self.entity.name, name, "unknown association")
        })?;
        let target = self.catalog.association_target(association)?;
        let reference = self.catalog.association_reference(self.entity, association)?;
        let on_condition = association.join_condition(&self.entity.table_name, &reference);

        Ok(Join::left_outer(&target.table_name, &on_condition)
            .aliased_as(&reference)
            .for_association(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Association, ColumnType};

    fn catalog() -> EntityCatalog {
        EntityCatalog::new()
            .with(EntityType::new("User", "users").column("id", ColumnType::BigInt))
            .with(
                EntityType::new("Widget", "widgets")
                    .column("id", ColumnType::BigInt)
                    .column("owner_id", ColumnType::BigInt)
                    .column("creator_id", ColumnType::BigInt)
                    .association(Association::belongs_to("owner", "User"))
                    .association(Association::belongs_to("creator", "User")),
            )
    }

    #[test]
    fn test_build_without_joins() {
        let catalog = catalog();
        let widget = catalog.require("Widget").unwrap();
        let relation = RelationBuilder::new(widget, &catalog)
            .build::<&str>(r#""widgets"."id" = 1"#, &[])
            .unwrap();

        assert!(relation.eager_loads().is_empty());
        assert!(relation.referenced_associations().is_empty());
        assert_eq!(
            relation.build_sql(),
            r#"SELECT "widgets".* FROM "widgets" WHERE ("widgets"."id" = 1)"#
        );
    }

    #[test]
    fn test_build_with_join_forces_reference() {
        let catalog = catalog();
        let widget = catalog.require("Widget").unwrap();
        let relation = RelationBuilder::new(widget, &catalog)
            .build("", &["owner"])
            .unwrap();

        assert_eq!(relation.eager_loads(), ["owner".to_string()]);
        assert_eq!(relation.referenced_associations(), ["owner".to_string()]);
        assert_eq!(
            relation.build_sql(),
            r#"SELECT "widgets".* FROM "widgets" LEFT OUTER JOIN "users" ON "users"."id" = "widgets"."owner_id""#
        );
    }

    #[test]
    fn test_unknown_association_is_rejected() {
        let catalog = catalog();
        let widget = catalog.require("Widget").unwrap();
        let err = RelationBuilder::new(widget, &catalog)
            .build("", &["nope"])
            .unwrap_err();
        assert!(matches!(err, AuthzSqlError::InvalidCondition { .. }));
    }

    #[test]
    fn test_same_table_joined_twice_is_aliased() {
        let catalog = catalog();
        let widget = catalog.require("Widget").unwrap();
        let relation = RelationBuilder::new(widget, &catalog)
            .build("", &["creator", "owner"])
            .unwrap();

        assert_eq!(
            relation.build_sql(),
            concat!(
                r#"SELECT "widgets".* FROM "widgets" "#,
                r#"LEFT OUTER JOIN "users" "creator_users" ON "creator_users"."id" = "widgets"."creator_id" "#,
                r#"LEFT OUTER JOIN "users" ON "users"."id" = "widgets"."owner_id""#
            )
        );
    }
}
