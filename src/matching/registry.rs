use std::collections::HashMap;
use std::sync::Arc;

use super::{EnumAttributeMatcher, MatchingStrategy};

/// Entity type name → matching strategy
///
/// Types without an explicit registration use the default strategy, which is
/// enum-aware unless replaced.
#[derive(Debug, Clone)]
pub struct MatcherRegistry {
    strategies: HashMap<String, Arc<dyn MatchingStrategy>>,
    default: Arc<dyn MatchingStrategy>,
}

impl Default for MatcherRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl MatcherRegistry {
    pub fn new() -> Self {
        Self {
            strategies: HashMap::new(),
            default: Arc::new(EnumAttributeMatcher),
        }
    }

    /// Registry whose fallback strategy is `strategy`
    pub fn with_default(strategy: impl MatchingStrategy + 'static) -> Self {
        Self {
            strategies: HashMap::new(),
            default: Arc::new(strategy),
        }
    }

    pub fn register(&mut self, entity_type: impl Into<String>, strategy: Arc<dyn MatchingStrategy>) {
        self.strategies.insert(entity_type.into(), strategy);
    }

    pub fn with(mut self, entity_type: impl Into<String>, strategy: impl MatchingStrategy + 'static) -> Self {
        self.register(entity_type, Arc::new(strategy));
        self
    }

    pub fn resolve(&self, entity_type: &str) -> &dyn MatchingStrategy {
        self.strategies
            .get(entity_type)
            .unwrap_or(&self.default)
            .as_ref()
    }

    pub fn is_registered(&self, entity_type: &str) -> bool {
        self.strategies.contains_key(entity_type)
    }
}
