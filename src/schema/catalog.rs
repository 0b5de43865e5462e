//! Snapshot of all known entity types.

use std::collections::HashMap;
use std::sync::Arc;

use super::{Association, EntityType};
use crate::error::{AuthzSqlError, Result};

/// Entity types keyed by name
///
/// Treated as an immutable snapshot for the duration of a compilation; callers
/// rebuild or clone it rather than mutating it while compilations are running.
#[derive(Debug, Clone, Default)]
pub struct EntityCatalog {
    entities: HashMap<String, Arc<EntityType>>,
}

impl EntityCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, entity: EntityType) -> Arc<EntityType> {
        let entity = Arc::new(entity);
        self.entities.insert(entity.name.clone(), Arc::clone(&entity));
        entity
    }

    pub fn with(mut self, entity: EntityType) -> Self {
        self.register(entity);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Arc<EntityType>> {
        self.entities.get(name)
    }

    /// Look up an entity type, failing when it was never registered
    pub fn require(&self, name: &str) -> Result<&Arc<EntityType>> {
        self.get(name).ok_or_else(|| AuthzSqlError::UnknownEntity {
            entity: name.to_string(),
        })
    }

    /// Target entity of an association
    pub fn association_target(&self, association: &Association) -> Result<&Arc<EntityType>> {
        self.require(&association.target)
    }

    /// Name under which an association's target table appears in SQL
    ///
    /// The bare table name, unless the owner's own table or an association declared
    /// earlier on the owner already uses it; those get `<association>_<table>`.
    pub fn association_reference(
        &self,
        owner: &EntityType,
        association: &Association,
    ) -> Result<String> {
        let table = &self.association_target(association)?.table_name;

        let taken = *table == owner.table_name
            || owner
                .associations
                .iter()
                .take_while(|earlier| earlier.name != association.name)
                .any(|earlier| {
                    self.get(&earlier.target)
                        .is_some_and(|target| target.table_name == *table)
                });

        if taken {
            Ok(format!("{}_{table}", association.name))
        } else {
            Ok(table.clone())
        }
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
