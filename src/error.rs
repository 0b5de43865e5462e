//! # Error Types
//!
//! Structured error handling for condition compilation using thiserror.
//! Every failure is a deterministic function of malformed input or metadata;
//! nothing here is retried.

use thiserror::Error;

/// Errors raised while resolving, expanding or compiling condition maps
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AuthzSqlError {
    #[error("Invalid condition on {entity}: {key}: {reason}")]
    InvalidCondition {
        entity: String,
        key: String,
        reason: String,
    },

    #[error("Unsupported condition value for {column}: {reason}")]
    UnsupportedValue { column: String, reason: String },

    #[error("Unsafe literal rejected: {reason}")]
    UnsafeLiteral { reason: String },

    #[error("Unknown entity type: {entity}")]
    UnknownEntity { entity: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl AuthzSqlError {
    pub fn invalid_condition(
        entity: impl Into<String>,
        key: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidCondition {
            entity: entity.into(),
            key: key.into(),
            reason: reason.into(),
        }
    }

    pub fn unsupported_value(column: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnsupportedValue {
            column: column.into(),
            reason: reason.into(),
        }
    }

    /// Whether the error was caused by the condition map rather than metadata or config
    pub fn is_condition_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidCondition { .. } | Self::UnsupportedValue { .. } | Self::UnsafeLiteral { .. }
        )
    }
}

impl From<config::ConfigError> for AuthzSqlError {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthzSqlError>;
