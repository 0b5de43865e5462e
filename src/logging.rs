//! # Structured Logging Module
//!
//! Environment-aware structured logging for the condition compiler. The
//! subscriber is installed at most once; if the host application already owns a
//! global subscriber, that one keeps receiving our events.

use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::AdapterConfig;

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging from the adapter configuration
pub fn init_structured_logging(config: &AdapterConfig) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

        let console = if config.json_logs {
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .json()
                .with_filter(filter)
                .boxed()
        } else {
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_ansi(true)
                .with_filter(filter)
                .boxed()
        };

        // Use try_init to avoid panic if global subscriber already set
        if tracing_subscriber::registry().with(console).try_init().is_err() {
            tracing::debug!("Global tracing subscriber already initialized - continuing with existing subscriber");
        }

        tracing::info!(
            environment = %config.environment,
            log_level = %config.log_level,
            json = config.json_logs,
            "Structured logging initialized"
        );
    });
}

/// Log one compiled predicate
pub fn log_compilation(entity: &str, condition_count: usize, sql: &str) {
    tracing::info!(
        entity = %entity,
        conditions = condition_count,
        sql = %sql,
        "COMPILED_CONDITIONS"
    );
}

/// Log an in-memory match decision
pub fn log_match_decision(entity: &str, attribute: &str, enum_aware: bool, matched: bool) {
    tracing::debug!(
        entity = %entity,
        attribute = %attribute,
        enum_aware = enum_aware,
        matched = matched,
        "MATCH_DECISION"
    );
}
