//! # Adapter Configuration
//!
//! Configuration for logging and diagnostics of the condition compiler.
//!
//! ## Sources
//!
//! Values are layered, later sources winning:
//!
//! - **Defaults**: derived from the detected environment
//! - **File**: optional YAML/TOML/JSON file, format taken from the extension
//! - **Environment**: `AUTHZ_SQL_*` variables (e.g. `AUTHZ_SQL_LOG_COMPILED_SQL=true`)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use authz_sql::config::AdapterConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AdapterConfig::load(Some("config/authz_sql.toml".as_ref()))?;
//! authz_sql::logging::init_structured_logging(&config);
//! # Ok(())
//! # }
//! ```

pub mod loader;

use serde::{Deserialize, Serialize};

use crate::constants::env::{DEFAULT_ENVIRONMENT, ENVIRONMENT_VARIABLES};
use crate::error::{AuthzSqlError, Result};

pub use loader::ConfigLoader;

/// Runtime configuration of the adapter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterConfig {
    /// Deployment environment (development, test, production, ...)
    pub environment: String,
    /// `EnvFilter` directive used when logging is initialized
    pub log_level: String,
    /// Emit log lines as JSON instead of human-readable text
    #[serde(default)]
    pub json_logs: bool,
    /// Log every compiled predicate at info level
    #[serde(default)]
    pub log_compiled_sql: bool,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self::for_environment(&detect_environment())
    }
}

impl AdapterConfig {
    /// Defaults for a named environment
    pub fn for_environment(environment: &str) -> Self {
        Self {
            environment: environment.to_string(),
            log_level: default_log_level(environment).to_string(),
            json_logs: environment == "production",
            log_compiled_sql: false,
        }
    }

    /// Load layered configuration, see the module docs for the source order
    pub fn load(path: Option<&std::path::Path>) -> Result<Self> {
        ConfigLoader::new().with_file(path).load()
    }

    pub fn validate(&self) -> Result<()> {
        if self.log_level.trim().is_empty() {
            return Err(AuthzSqlError::Configuration {
                message: "log_level must not be empty".to_string(),
            });
        }
        if self.environment.trim().is_empty() {
            return Err(AuthzSqlError::Configuration {
                message: "environment must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Current environment from the first environment variable that is set
pub fn detect_environment() -> String {
    ENVIRONMENT_VARIABLES
        .iter()
        .find_map(|name| std::env::var(name).ok().filter(|value| !value.is_empty()))
        .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string())
}

fn default_log_level(environment: &str) -> &'static str {
    match environment {
        "production" => "info",
        _ => "debug",
    }
}
