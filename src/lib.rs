//! tablegate: decides which relations a logical replication stream emits.
//!
//! A replication session is started with ordered `include`/`exclude`
//! options, each holding a small JSON object: `{"table": "name"}` for one
//! relation or `{"tables": "regex"}` for every relation whose name the
//! pattern matches. The options become a [`DirectiveList`](rules::DirectiveList);
//! each relation's name is then folded over that list, the last applicable
//! directive deciding. With no options at all every relation is emitted.
//!
//! # Architecture
//!
//! - **[`parse`]**: Reads one raw configuration entry into a [`parse::TableSpec`].
//! - **[`rules`]**: Directives, the ordered list builder, the evaluator and the session [`RuleSet`].
//! - **[`config`]**: Configuration loading: embedded defaults + user overlay merge.
//! - **[`logging`]**: Terminal logger setup and the optional decision log file.
//! - **[`error`]**: The crate's error type.

/// Error type shared by every layer.
pub mod error;
/// Configuration types, loading, and overlay merge logic.
pub mod config;
/// Logger setup and file-based decision logging.
pub mod logging;
/// Configuration entry parsing.
pub mod parse;
/// Directive model, list builder and evaluator.
pub mod rules;

pub use error::{Error, Result};
pub use rules::{RuleSet, should_emit};

/// Build a rule set from ordered `(option, value)` pairs and evaluate one relation.
///
/// Convenience entry point for tests and one-off checks. Long-lived callers
/// should build the [`RuleSet`] once and reuse it.
pub fn evaluate(options: &[(&str, &str)], relation: &str) -> Result<bool> {
    let rules = RuleSet::from_options(options.iter().map(|&(name, value)| (name, Some(value))))?;
    rules.should_emit(relation)
}
