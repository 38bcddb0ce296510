//! Error type shared by the entry parser, the directive builder and the evaluator.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures while loading configuration, building a rule set or evaluating it.
///
/// None of these are recoverable locally: a half-applied rule set would
/// silently share too much or too little, so callers abort the session setup
/// (or the current decoding pass) instead of falling back to a default.
#[derive(Debug, Error)]
pub enum Error {
    /// A configuration file could not be read.
    #[error("cannot read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration file is not valid TOML for the expected layout.
    #[error("config parse error in {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A configuration entry does not describe a table or a table pattern.
    #[error("parameter \"{option}\" not valid: \"{raw}\" ({detail})")]
    InvalidConfig {
        /// Option name the entry was supplied under (`include` or `exclude`).
        option: String,
        /// The raw configuration text, quoted back for diagnostics.
        raw: String,
        /// What was wrong with it.
        detail: String,
    },

    /// A `tables` value failed to compile as a regular expression.
    #[error("invalid regular expression \"{pattern}\": {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: Box<fancy_regex::Error>,
    },

    /// A pattern could not be evaluated against a candidate name: the name is
    /// not valid UTF-8, or the matcher gave up (backtracking limit).
    #[error("regular expression match for \"{candidate}\" failed: {source}")]
    MatchFailure {
        candidate: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl Error {
    pub(crate) fn invalid_config(
        option: &str,
        raw: &str,
        detail: impl Into<String>,
    ) -> Self {
        Error::InvalidConfig {
            option: option.to_string(),
            raw: raw.to_string(),
            detail: detail.into(),
        }
    }

    pub(crate) fn match_failure(
        candidate: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Error::MatchFailure {
            candidate: candidate.into(),
            source: source.into(),
        }
    }
}
