#![allow(clippy::doc_markdown)] // Allow technical terms like PostgreSQL, JSONB in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Authz SQL Bridge
//!
//! Bridges authorization rule conditions into a relational store.
//!
//! ## Overview
//!
//! Permission rules describe the records they grant access to with declarative
//! condition maps (`{"status": "open", "owner": {"team_id": 7}}`). This crate
//! turns those maps into:
//!
//! - an escaped SQL predicate string for filtering in the database,
//! - a lazy [`Relation`] with eager-loaded and joined associations, and
//! - an in-memory yes/no answer for a single instance, with enum attributes
//!   compared by their integer codes.
//!
//! ## Module Organization
//!
//! - [`compiler`] - condition map → SQL fragments (alias resolution, aggregate
//!   expansion, JSON extraction, predicate construction, joining)
//! - [`query_builder`] - lazy relations, predicate nodes, quoting
//! - [`matching`] - enum-aware and scalar instance matching, strategy registry
//! - [`schema`] - entity metadata supplied by the authorization engine
//! - [`adapter`] - [`RelationalAdapter`], the entry point per entity type
//! - [`config`] / [`logging`] - configuration loading and structured logging
//! - [`error`] - structured error handling
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use authz_sql::schema::{Association, ColumnType, EntityCatalog, EntityType};
//! use authz_sql::{ConditionMap, RelationalAdapter};
//!
//! # fn main() -> authz_sql::Result<()> {
//! let catalog = Arc::new(
//!     EntityCatalog::new()
//!         .with(EntityType::new("User", "users").column("id", ColumnType::BigInt))
//!         .with(
//!             EntityType::new("Widget", "widgets")
//!                 .column("status", ColumnType::Text)
//!                 .column("owner_id", ColumnType::BigInt)
//!                 .association(Association::belongs_to("owner", "User")),
//!         ),
//! );
//! let adapter = RelationalAdapter::for_entity(catalog, "Widget")?;
//!
//! let conditions = ConditionMap::new().with("status", "open");
//! let relation = adapter.build_relation(&conditions, &["owner"])?;
//! assert!(relation.build_sql().contains("LEFT OUTER JOIN \"users\""));
//! # Ok(())
//! # }
//! ```
//!
//! ## Limitations
//!
//! Only conjunctions of equality, membership and JSON key leaves are compiled.
//! A JSON column condition uses only the first key of its nested map.

pub mod adapter;
pub mod compiler;
pub mod conditions;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod matching;
pub mod query_builder;
pub mod schema;

pub use adapter::RelationalAdapter;
pub use compiler::{CompiledFragment, ConditionCompiler, PostgresPredicates, PredicateSet, PredicateStrategy};
pub use conditions::ConditionMap;
pub use config::AdapterConfig;
pub use error::{AuthzSqlError, Result};
pub use matching::{EnumAttributeMatcher, MatcherRegistry, MatchingStrategy, Record, ScalarMatcher, Subject};
pub use query_builder::{Relation, RelationBuilder};
