//! # System Constants
//!
//! Fixed SQL tokens and naming conventions shared by the compiler, the
//! relation builder and the configuration loader.

/// SQL tokens emitted by the predicate compiler
pub mod sql {
    /// Separator placed between compiled fragments
    pub const FRAGMENT_SEPARATOR: &str = " AND ";
    /// Predicate for a membership test against an empty collection
    pub const ALWAYS_FALSE: &str = "1=0";
    /// JSON key-path operator used for JSON column conditions
    pub const JSON_KEY_OPERATOR: &str = "->";
}

/// Naming conventions for associations
pub mod naming {
    pub const DEFAULT_PRIMARY_KEY: &str = "id";
    pub const FOREIGN_KEY_SUFFIX: &str = "_id";
}

/// Environment variables consulted by configuration and logging
pub mod env {
    pub const CONFIG_PREFIX: &str = "AUTHZ_SQL";
    /// Checked in order; the first one set wins
    pub const ENVIRONMENT_VARIABLES: [&str; 3] = ["AUTHZ_SQL_ENV", "RAILS_ENV", "APP_ENV"];
    pub const DEFAULT_ENVIRONMENT: &str = "development";
}
