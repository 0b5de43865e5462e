//! Association metadata and join conditions.

use serde::{Deserialize, Serialize};

use crate::constants::naming::{DEFAULT_PRIMARY_KEY, FOREIGN_KEY_SUFFIX};
use crate::query_builder::quote_identifier;

/// Kind of association between two entity types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssociationKind {
    /// Foreign key lives on the owning table
    BelongsTo,
    /// Foreign key lives on the target table, at most one row
    HasOne,
    /// Foreign key lives on the target table
    HasMany,
}

/// Named association from one entity type to another
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Association {
    pub name: String,
    pub kind: AssociationKind,
    /// Entity type name of the target, resolved through the catalog
    pub target: String,
    pub foreign_key: String,
    pub primary_key: String,
}

impl Association {
    /// `belongs_to :owner` style association with `owner_id` foreign key
    pub fn belongs_to(name: impl Into<String>, target: impl Into<String>) -> Self {
        let name = name.into();
        let foreign_key = format!("{name}{FOREIGN_KEY_SUFFIX}");
        Self {
            name,
            kind: AssociationKind::BelongsTo,
            target: target.into(),
            foreign_key,
            primary_key: DEFAULT_PRIMARY_KEY.to_string(),
        }
    }

    pub fn has_one(
        name: impl Into<String>,
        target: impl Into<String>,
        foreign_key: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: AssociationKind::HasOne,
            target: target.into(),
            foreign_key: foreign_key.into(),
            primary_key: DEFAULT_PRIMARY_KEY.to_string(),
        }
    }

    pub fn has_many(
        name: impl Into<String>,
        target: impl Into<String>,
        foreign_key: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: AssociationKind::HasMany,
            target: target.into(),
            foreign_key: foreign_key.into(),
            primary_key: DEFAULT_PRIMARY_KEY.to_string(),
        }
    }

    pub fn with_foreign_key(mut self, foreign_key: impl Into<String>) -> Self {
        self.foreign_key = foreign_key.into();
        self
    }

    pub fn with_primary_key(mut self, primary_key: impl Into<String>) -> Self {
        self.primary_key = primary_key.into();
        self
    }

    /// Join condition between the owning table and the target table
    ///
    /// `target_reference` is the target's table name or its alias in the query.
    pub fn join_condition(&self, owner_table: &str, target_reference: &str) -> String {
        let owner = quote_identifier(owner_table);
        let target = quote_identifier(target_reference);
        let fk = quote_identifier(&self.foreign_key);
        let pk = quote_identifier(&self.primary_key);

        match self.kind {
            AssociationKind::BelongsTo => format!("{target}.{pk} = {owner}.{fk}"),
            AssociationKind::HasOne | AssociationKind::HasMany => {
                format!("{target}.{fk} = {owner}.{pk}")
            }
        }
    }
}
