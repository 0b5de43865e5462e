//! # Query Builder System
//!
//! Lazy relations and predicate nodes used by the condition compiler.
//!
//! ## Key Components
//!
//! - [`builder`] - [`RelationBuilder`] applying predicates and association joins to a table
//! - [`relation`] - [`Relation`], the unexecuted query description
//! - [`predicate`] - abstract predicate nodes plus identifier/literal quoting
//! - [`joins`] - JOIN clause rendering
//!
//! ## Escaping
//!
//! Every literal reaching SQL text goes through [`quote_literal`]; identifiers go
//! through [`quote_identifier`]. Relations render parenthesized WHERE groups, so
//! compiled predicates can be embedded without the caller regrouping them.

pub mod builder;
pub mod joins;
pub mod predicate;
pub mod relation;

pub use builder::RelationBuilder;
pub use joins::Join;
pub use predicate::{quote_identifier, quote_literal, quote_string, ColumnRef, PredicateNode};
pub use relation::Relation;
