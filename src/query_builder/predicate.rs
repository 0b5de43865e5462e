use serde_json::Value;

use crate::error::{AuthzSqlError, Result};

/// Reference to a physical column of a specific table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRef {
    pub table: String,
    pub column: String,
}

impl ColumnRef {
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
        }
    }

    /// Interpret a condition key, qualified (`table.column`) or bare
    pub fn from_key(key: &str, default_table: &str) -> Self {
        match key.split_once('.') {
            Some((table, column)) => Self::new(table, column),
            None => Self::new(default_table, key),
        }
    }

    /// Whether the reference points at the given table
    pub fn is_on(&self, table: &str) -> bool {
        self.table == table
    }

    pub fn to_sql(&self) -> String {
        format!(
            "{}.{}",
            quote_identifier(&self.table),
            quote_identifier(&self.column)
        )
    }
}

/// Abstract predicate node for a single leaf condition
#[derive(Debug, Clone, PartialEq)]
pub enum PredicateNode {
    Equality { column: ColumnRef, value: Value },
    In { column: ColumnRef, values: Vec<Value> },
    IsNull { column: ColumnRef },
    Or(Vec<PredicateNode>),
    /// Membership in an empty collection
    False,
}

impl PredicateNode {
    pub fn eq(column: ColumnRef, value: Value) -> Self {
        if value.is_null() {
            PredicateNode::IsNull { column }
        } else {
            PredicateNode::Equality { column, value }
        }
    }

    /// Membership test with `NULL` members split into an `IS NULL` alternative
    pub fn membership(column: ColumnRef, values: Vec<Value>) -> Self {
        let has_null = values.iter().any(Value::is_null);
        let present: Vec<Value> = values.into_iter().filter(|v| !v.is_null()).collect();

        match (present.is_empty(), has_null) {
            (true, false) => PredicateNode::False,
            (true, true) => PredicateNode::IsNull { column },
            (false, false) => PredicateNode::In {
                column,
                values: present,
            },
            (false, true) => PredicateNode::Or(vec![
                PredicateNode::In {
                    column: column.clone(),
                    values: present,
                },
                PredicateNode::IsNull { column },
            ]),
        }
    }

    /// Convert node to SQL string with every value escaped
    pub fn to_sql(&self) -> Result<String> {
        match self {
            PredicateNode::Equality { column, value } => {
                Ok(format!("{} = {}", column.to_sql(), quote_literal(value)?))
            }
            PredicateNode::In { column, values } => {
                let value_list = values
                    .iter()
                    .map(quote_literal)
                    .collect::<Result<Vec<_>>>()?
                    .join(", ");
                Ok(format!("{} IN ({value_list})", column.to_sql()))
            }
            PredicateNode::IsNull { column } => Ok(format!("{} IS NULL", column.to_sql())),
            PredicateNode::Or(nodes) => {
                let parts = nodes
                    .iter()
                    .map(PredicateNode::to_sql)
                    .collect::<Result<Vec<_>>>()?;
                Ok(format!("({})", parts.join(" OR ")))
            }
            PredicateNode::False => Ok(crate::constants::sql::ALWAYS_FALSE.to_string()),
        }
    }
}

/// Quote an identifier, doubling embedded double quotes
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Quote a string literal, doubling embedded single quotes
///
/// NUL bytes cannot be stored in a PostgreSQL text value and are rejected.
pub fn quote_string(value: &str) -> Result<String> {
    if value.contains('\0') {
        return Err(AuthzSqlError::UnsafeLiteral {
            reason: "string literal contains a NUL byte".to_string(),
        });
    }
    Ok(format!("'{}'", value.replace('\'', "''")))
}

/// Format a JSON value as an SQL literal
pub fn quote_literal(value: &Value) -> Result<String> {
    match value {
        Value::Null => Ok("NULL".to_string()),
        Value::Bool(true) => Ok("TRUE".to_string()),
        Value::Bool(false) => Ok("FALSE".to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::String(s) => quote_string(s),
        _ => quote_string(&value.to_string()),
    }
}
