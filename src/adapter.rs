//! # Relational Adapter
//!
//! Entry point used by the authorization engine for one entity type. It
//! exposes the three collaborator operations:
//!
//! - [`RelationalAdapter::sanitize_sql`] - condition map → escaped predicate string
//! - [`RelationalAdapter::build_relation`] - condition map + associations → lazy relation
//! - [`RelationalAdapter::matches`] - in-memory check of one instance
//!
//! The predicate strategy is a type parameter, so the SQL dialect is fixed at
//! compile time.

use serde_json::Value;
use std::sync::Arc;

use crate::compiler::{ConditionCompiler, PostgresPredicates, PredicateStrategy};
use crate::conditions::ConditionMap;
use crate::config::AdapterConfig;
use crate::error::Result;
use crate::logging::{log_compilation, log_match_decision};
use crate::matching::{MatcherRegistry, Subject};
use crate::query_builder::{Relation, RelationBuilder};
use crate::schema::{EntityCatalog, EntityType};

/// Condition compiler, relation builder and matcher bound to one entity type
#[derive(Debug, Clone)]
pub struct RelationalAdapter<S: PredicateStrategy = PostgresPredicates> {
    entity: Arc<EntityType>,
    catalog: Arc<EntityCatalog>,
    strategy: S,
    matchers: Arc<MatcherRegistry>,
    config: AdapterConfig,
}

impl RelationalAdapter<PostgresPredicates> {
    pub fn new(entity: Arc<EntityType>, catalog: Arc<EntityCatalog>) -> Self {
        Self::with_strategy(entity, catalog, PostgresPredicates)
    }

    /// Adapter for a catalog entry, failing if the entity type is unknown
    pub fn for_entity(catalog: Arc<EntityCatalog>, entity_type: &str) -> Result<Self> {
        let entity = Arc::clone(catalog.require(entity_type)?);
        Ok(Self::new(entity, catalog))
    }
}

impl<S: PredicateStrategy> RelationalAdapter<S> {
    pub fn with_strategy(entity: Arc<EntityType>, catalog: Arc<EntityCatalog>, strategy: S) -> Self {
        Self {
            entity,
            catalog,
            strategy,
            matchers: Arc::new(MatcherRegistry::new()),
            config: AdapterConfig::default(),
        }
    }

    pub fn with_matchers(mut self, matchers: Arc<MatcherRegistry>) -> Self {
        self.matchers = matchers;
        self
    }

    pub fn with_config(mut self, config: AdapterConfig) -> Self {
        self.config = config;
        self
    }

    pub fn entity(&self) -> &EntityType {
        &self.entity
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    fn compiler(&self) -> ConditionCompiler<'_, S> {
        ConditionCompiler::new(&self.entity, &self.catalog, &self.strategy)
    }

    /// Compile a condition map into one `AND`-joined predicate without outer parentheses
    pub fn sanitize_sql(&self, conditions: &ConditionMap) -> Result<String> {
        let sql = self.compiler().sanitize_sql(conditions)?;
        if self.config.log_compiled_sql {
            log_compilation(&self.entity.name, conditions.len(), &sql);
        }
        Ok(sql)
    }

    /// Lazy relation filtered by `conditions`, eager-loading and joining `join_names`
    pub fn build_relation<J: AsRef<str>>(
        &self,
        conditions: &ConditionMap,
        join_names: &[J],
    ) -> Result<Relation> {
        let predicate = self.sanitize_sql(conditions)?;
        RelationBuilder::new(&self.entity, &self.catalog).build(&predicate, join_names)
    }

    /// Whether matching `attribute` on `subject` is handled by a non-default policy
    pub fn overrides_condition_matching(&self, subject: &dyn Subject, attribute: &str) -> bool {
        let entity = self.catalog.get(subject.entity_type()).map(Arc::as_ref);
        self.matchers
            .resolve(subject.entity_type())
            .overrides_condition_matching(entity, attribute)
    }

    /// Check one condition against an instance in memory
    pub fn matches(&self, subject: &dyn Subject, attribute: &str, value: &Value) -> bool {
        let entity = self.catalog.get(subject.entity_type()).map(Arc::as_ref);
        let strategy = self.matchers.resolve(subject.entity_type());
        let matched = strategy.matches_condition(entity, subject, attribute, value);

        log_match_decision(
            subject.entity_type(),
            attribute,
            strategy.overrides_condition_matching(entity, attribute),
            matched,
        );

        matched
    }
}
