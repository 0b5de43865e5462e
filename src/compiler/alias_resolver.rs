use serde_json::{Map, Value};
use tracing::debug;

use super::resolved::ResolvedCondition;
use crate::conditions::{ConditionMap, ValueShape};
use crate::error::{AuthzSqlError, Result};
use crate::schema::{Association, AssociationKind, EntityCatalog, EntityType};

/// Rewrites alias and association keys into physical column references
///
/// Keys on the base entity stay bare (`status`); keys reached through an
/// association are qualified with the target's table reference (`users.name`,
/// or `creator_users.name` when the table is already taken by another
/// association). Every input leaf yields its own resolved condition, even when
/// several land on the same column.
#[derive(Debug, Clone, Copy)]
pub struct ColumnAliasResolver<'a> {
    entity: &'a EntityType,
    catalog: &'a EntityCatalog,
}

impl<'a> ColumnAliasResolver<'a> {
    pub fn new(entity: &'a EntityType, catalog: &'a EntityCatalog) -> Self {
        Self { entity, catalog }
    }

    /// Produce the physical-column leaves of a condition map, in input order
    pub fn resolve(&self, conditions: &ConditionMap) -> Result<Vec<ResolvedCondition>> {
        let mut resolved = Vec::with_capacity(conditions.len());
        let base = self.entity.name.as_str();

        for (key, value) in conditions.iter() {
            if let Some(column) = self.entity.alias_target(key) {
                resolved.push(ResolvedCondition::new(column, value.clone(), base));
            } else if self.entity.has_column(key) || self.entity.find_aggregation(key).is_some() {
                resolved.push(ResolvedCondition::new(key, value.clone(), base));
            } else if let Some(association) = self.entity.find_association(key) {
                self.resolve_association(self.entity, None, association, value, &mut resolved)?;
            } else if key.contains('.') {
                let owner = self.check_qualified(key)?;
                resolved.push(ResolvedCondition::new(key, value.clone(), &owner.name));
            } else {
                return Err(AuthzSqlError::invalid_condition(
                    base,
                    key,
                    "not a column, alias, aggregation or association",
                ));
            }
        }

        debug!(
            entity = %self.entity.name,
            input_keys = conditions.len(),
            resolved_leaves = resolved.len(),
            "Resolved column aliases"
        );

        Ok(resolved)
    }

    /// `owner_reference` is `None` for the base entity, whose columns stay bare
    fn resolve_association(
        &self,
        owner: &EntityType,
        owner_reference: Option<&str>,
        association: &Association,
        value: &Value,
        resolved: &mut Vec<ResolvedCondition>,
    ) -> Result<()> {
        match ValueShape::of(value) {
            ValueShape::Nested(nested) => {
                let target = self.catalog.association_target(association)?;
                let reference = self.catalog.association_reference(owner, association)?;
                self.resolve_nested(target, &reference, nested, resolved)
            }
            _ if association.kind == AssociationKind::BelongsTo => {
                let key = match owner_reference {
                    Some(reference) => format!("{reference}.{}", association.foreign_key),
                    None => association.foreign_key.clone(),
                };
                resolved.push(ResolvedCondition::new(key, value.clone(), &owner.name));
                Ok(())
            }
            _ => Err(AuthzSqlError::invalid_condition(
                &owner.name,
                &association.name,
                "conditions on has_one/has_many associations need a nested map",
            )),
        }
    }

    fn resolve_nested(
        &self,
        target: &EntityType,
        reference: &str,
        nested: &Map<String, Value>,
        resolved: &mut Vec<ResolvedCondition>,
    ) -> Result<()> {
        for (key, value) in nested {
            let column = target
                .alias_target(key)
                .or_else(|| target.has_column(key).then_some(key.as_str()));

            if let Some(column) = column {
                resolved.push(ResolvedCondition::new(
                    format!("{reference}.{column}"),
                    value.clone(),
                    &target.name,
                ));
            } else if let Some(association) = target.find_association(key) {
                self.resolve_association(target, Some(reference), association, value, resolved)?;
            } else {
                return Err(AuthzSqlError::invalid_condition(
                    &target.name,
                    key,
                    "not a column, alias or association",
                ));
            }
        }
        Ok(())
    }

    /// A `reference.column` key must name a column of this table or of a direct association
    fn check_qualified(&self, key: &str) -> Result<&'a EntityType> {
        let owner = key.split_once('.').and_then(|(reference, column)| {
            if reference == self.entity.table_name {
                return self.entity.has_column(column).then_some(self.entity);
            }
            self.entity.associations.iter().find_map(|association| {
                let target = self.catalog.get(&association.target)?;
                let matches = self
                    .catalog
                    .association_reference(self.entity, association)
                    .is_ok_and(|name| name == reference);
                (matches && target.has_column(column)).then_some(target.as_ref())
            })
        });

        owner.ok_or_else(|| {
            AuthzSqlError::invalid_condition(
                &self.entity.name,
                key,
                "qualified key does not name a column of this or an associated table",
            )
        })
    }
}
