//! # In-Memory Matching
//!
//! Decides whether a single instance satisfies one rule condition without
//! touching the database. Matching policy is chosen per entity type through the
//! [`MatcherRegistry`]; the default [`EnumAttributeMatcher`] compares enum
//! attributes by integer code and everything else by value.

pub mod enum_matcher;
pub mod registry;
pub mod strategy;
pub mod subject;

pub use enum_matcher::EnumAttributeMatcher;
pub use registry::MatcherRegistry;
pub use strategy::{MatchingStrategy, ScalarMatcher};
pub use subject::{Record, Subject};
