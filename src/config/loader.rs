//! Configuration Loader
//!
//! Layers environment defaults, an optional configuration file and `AUTHZ_SQL_*`
//! environment variables using the `config` crate.

use config::{Config, Environment, File};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{detect_environment, AdapterConfig};
use crate::constants::env::CONFIG_PREFIX;
use crate::error::Result;

/// Builder for [`AdapterConfig`] sources
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    file: Option<PathBuf>,
    environment: Option<String>,
    use_env_vars: bool,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            file: None,
            environment: None,
            use_env_vars: true,
        }
    }

    /// Read a configuration file; the file must exist when given
    pub fn with_file(mut self, path: Option<&Path>) -> Self {
        self.file = path.map(Path::to_path_buf);
        self
    }

    /// Use an explicit environment instead of detecting it
    /// This is useful for testing without modifying global environment variables
    pub fn with_environment(mut self, environment: &str) -> Self {
        self.environment = Some(environment.to_string());
        self
    }

    /// Skip `AUTHZ_SQL_*` environment variables
    pub fn without_env_vars(mut self) -> Self {
        self.use_env_vars = false;
        self
    }

    pub fn load(&self) -> Result<AdapterConfig> {
        let environment = self.environment.clone().unwrap_or_else(detect_environment);
        let defaults = AdapterConfig::for_environment(&environment);

        let mut builder = Config::builder()
            .set_default("environment", defaults.environment)?
            .set_default("log_level", defaults.log_level)?
            .set_default("json_logs", defaults.json_logs)?
            .set_default("log_compiled_sql", defaults.log_compiled_sql)?;

        if let Some(path) = &self.file {
            debug!(path = %path.display(), "Loading configuration file");
            builder = builder.add_source(File::from(path.as_path()).required(true));
        }

        if self.use_env_vars {
            builder = builder.add_source(
                Environment::with_prefix(CONFIG_PREFIX)
                    .prefix_separator("_")
                    .try_parsing(true),
            );
        }

        let config: AdapterConfig = builder.build()?.try_deserialize()?;
        config.validate()?;

        debug!(
            environment = %config.environment,
            log_level = %config.log_level,
            json_logs = config.json_logs,
            log_compiled_sql = config.log_compiled_sql,
            "Configuration loaded successfully"
        );

        Ok(config)
    }
}
