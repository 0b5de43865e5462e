//! # Condition Compiler
//!
//! Translates a condition map into a single escaped SQL boolean expression.
//!
//! ## Pipeline
//!
//! 1. [`ColumnAliasResolver`] - alias and association keys become an ordered list of
//!    [`ResolvedCondition`] leaves on physical columns
//! 2. [`AggregateExpander`] - virtual attributes become their backing columns
//! 3. [`JsonConditionExtractor`] - nested maps on physical columns go to the JSON bucket
//! 4. [`PredicateBuilder`] - ordinary conditions go through the [`PredicateStrategy`],
//!    JSON conditions become `table.column->'key' = 'value'` fragments
//! 5. [`SqlFragmentJoiner`] - fragments are joined with `AND`
//!
//! The result carries no outer parentheses.
//!
//! ## Example
//!
//! ```rust
//! use authz_sql::compiler::{ConditionCompiler, PostgresPredicates};
//! use authz_sql::schema::{ColumnType, EntityCatalog, EntityType};
//! use authz_sql::ConditionMap;
//! use serde_json::json;
//!
//! let catalog = EntityCatalog::new().with(
//!     EntityType::new("Widget", "widgets")
//!         .column("status", ColumnType::Text)
//!         .column("data", ColumnType::Jsonb),
//! );
//! let widget = catalog.require("Widget").unwrap();
//! let conditions = ConditionMap::new()
//!     .with("status", "open")
//!     .with("data", json!({"color": "red"}));
//!
//! let sql = ConditionCompiler::new(widget, &catalog, &PostgresPredicates)
//!     .sanitize_sql(&conditions)
//!     .unwrap();
//! assert_eq!(sql, r#""widgets"."status" = 'open' AND widgets.data->'color' = 'red'"#);
//! ```

pub mod aggregate_expander;
pub mod alias_resolver;
pub mod fragment;
pub mod joiner;
pub mod json_extractor;
pub mod predicate_builder;
pub mod resolved;

pub use aggregate_expander::AggregateExpander;
pub use alias_resolver::ColumnAliasResolver;
pub use fragment::{CompiledFragment, PredicateSet};
pub use joiner::SqlFragmentJoiner;
pub use json_extractor::{ConditionPartition, JsonConditionExtractor};
pub use predicate_builder::{PostgresPredicates, PredicateBuilder, PredicateStrategy};
pub use resolved::ResolvedCondition;

use tracing::debug;

use crate::conditions::ConditionMap;
use crate::error::Result;
use crate::schema::{EntityCatalog, EntityType};

/// Runs the full compilation pipeline for one entity type
pub struct ConditionCompiler<'a, S: PredicateStrategy = PostgresPredicates> {
    entity: &'a EntityType,
    catalog: &'a EntityCatalog,
    strategy: &'a S,
}

impl<'a, S: PredicateStrategy> ConditionCompiler<'a, S> {
    pub fn new(entity: &'a EntityType, catalog: &'a EntityCatalog, strategy: &'a S) -> Self {
        Self {
            entity,
            catalog,
            strategy,
        }
    }

    /// Resolve, expand and partition a condition map
    pub fn partition(&self, conditions: &ConditionMap) -> Result<ConditionPartition> {
        let resolved = ColumnAliasResolver::new(self.entity, self.catalog).resolve(conditions)?;
        let expanded = AggregateExpander::new(self.entity).expand(resolved)?;
        Ok(JsonConditionExtractor::new(self.entity).partition(expanded))
    }

    /// Compile a condition map into its two fragment buckets
    pub fn compile(&self, conditions: &ConditionMap) -> Result<PredicateSet> {
        let partition = self.partition(conditions)?;
        PredicateBuilder::new(self.entity, self.catalog, self.strategy).build(&partition)
    }

    /// Compile a condition map into one `AND`-joined predicate string
    pub fn sanitize_sql(&self, conditions: &ConditionMap) -> Result<String> {
        let set = self.compile(conditions)?;
        let sql = SqlFragmentJoiner::join_set(&set);

        debug!(
            entity = %self.entity.name,
            ordinary = set.ordinary.len(),
            json = set.json.len(),
            "Compiled condition map"
        );

        Ok(sql)
    }
}
