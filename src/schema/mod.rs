//! # Entity Metadata
//!
//! Read-only description of the entity types conditions are compiled against:
//! table names, physical columns, associations, attribute aliases, aggregations
//! and enum registries. Metadata is supplied by the surrounding authorization
//! engine and shared as an immutable snapshot.

pub mod aggregation;
pub mod association;
pub mod catalog;
pub mod column;
pub mod entity;
pub mod enums;

pub use aggregation::Aggregation;
pub use association::{Association, AssociationKind};
pub use catalog::EntityCatalog;
pub use column::{Column, ColumnType};
pub use entity::EntityType;
pub use enums::{EnumDefinition, EnumRegistry};
