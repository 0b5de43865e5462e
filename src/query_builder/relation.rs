use super::predicate::quote_identifier;
use super::Join;

/// Lazy relation over a single table
///
/// Nothing is executed; the relation only describes the query. Eager-load
/// directives and join references are tracked separately: an association that
/// is only eager-loaded would be fetched with a follow-up query, while a
/// referenced association is joined into the main statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Relation {
    base_table: String,
    where_clauses: Vec<String>,
    joins: Vec<Join>,
    eager_loads: Vec<String>,
    references: Vec<String>,
}

impl Relation {
    /// Create an unfiltered relation for the given table
    pub fn new(table: &str) -> Self {
        Self {
            base_table: table.to_string(),
            where_clauses: Vec::new(),
            joins: Vec::new(),
            eager_loads: Vec::new(),
            references: Vec::new(),
        }
    }

    /// Add a compiled predicate; empty predicates leave the relation unfiltered
    pub fn where_sql(mut self, predicate: &str) -> Self {
        if !predicate.trim().is_empty() {
            self.where_clauses.push(predicate.to_string());
        }
        self
    }

    /// Add an eager-load directive for an association
    pub fn includes(mut self, association: &str) -> Self {
        if !self.eager_loads.iter().any(|name| name == association) {
            self.eager_loads.push(association.to_string());
        }
        self
    }

    /// Add an explicit join reference for an association
    pub fn references(mut self, association: &str, join: Join) -> Self {
        if !self.references.iter().any(|name| name == association) {
            self.references.push(association.to_string());
            self.joins.push(join);
        }
        self
    }

    pub fn where_clauses(&self) -> &[String] {
        &self.where_clauses
    }

    pub fn joins(&self) -> &[Join] {
        &self.joins
    }

    pub fn eager_loads(&self) -> &[String] {
        &self.eager_loads
    }

    pub fn referenced_associations(&self) -> &[String] {
        &self.references
    }

    /// True when at least one eager-loaded association is joined into the main query
    pub fn is_eager_loading(&self) -> bool {
        self.eager_loads
            .iter()
            .any(|name| self.references.contains(name))
    }

    /// Build the complete SQL query string
    pub fn build_sql(&self) -> String {
        let table = quote_identifier(&self.base_table);
        let mut sql = format!("SELECT {table}.* FROM {table}");

        for join in &self.joins {
            sql.push(' ');
            sql.push_str(&join.to_sql());
        }

        if !self.where_clauses.is_empty() {
            sql.push_str(" WHERE ");
            let where_parts: Vec<String> = self
                .where_clauses
                .iter()
                .map(|clause| format!("({clause})"))
                .collect();
            sql.push_str(&where_parts.join(" AND "));
        }

        sql
    }
}
