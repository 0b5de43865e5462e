use super::predicate::quote_identifier;

/// Represents a LEFT OUTER JOIN clause materialized for an association
///
/// A join that reuses a table already present in the query carries an alias;
/// its ON condition and any filtered columns refer to the alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Join {
    pub table: String,
    pub alias: Option<String>,
    pub on_condition: String,
    pub association: Option<String>,
}

impl Join {
    /// Create a LEFT OUTER JOIN
    pub fn left_outer(table: &str, on_condition: &str) -> Self {
        Self {
            table: table.to_string(),
            alias: None,
            on_condition: on_condition.to_string(),
            association: None,
        }
    }

    /// Join the table under `alias`; an alias equal to the table name is dropped
    pub fn aliased_as(mut self, alias: &str) -> Self {
        self.alias = (alias != self.table).then(|| alias.to_string());
        self
    }

    /// Tag the join with the association that produced it
    pub fn for_association(mut self, name: &str) -> Self {
        self.association = Some(name.to_string());
        self
    }

    /// Convert to SQL string
    pub fn to_sql(&self) -> String {
        let table = match &self.alias {
            Some(alias) => format!("{} {}", quote_identifier(&self.table), quote_identifier(alias)),
            None => quote_identifier(&self.table),
        };
        format!("LEFT OUTER JOIN {table} ON {}", self.on_condition)
    }
}
