//! Error types for waypost-router

use thiserror::Error;

/// Result type alias for route table operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while compiling patterns or validating a route table
#[derive(Debug, Error)]
pub enum Error {
    /// Pattern string that cannot be compiled
    #[error("Invalid pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Regular expression rejected by the regex engine
    #[error("Invalid regular expression: {0}")]
    InvalidRegex(#[from] regex::Error),

    /// A catch-all entry is followed by entries it makes unreachable
    #[error("Catch-all route {pattern:?} at position {index} must be last, found {following:?} after it")]
    MisplacedCatchAll {
        pattern: String,
        index: usize,
        following: String,
    },

    /// A literal entry can never be selected because an earlier entry accepts its path
    #[error("Route {pattern:?} at position {index} is shadowed by {shadowed_by:?}")]
    ShadowedRoute {
        pattern: String,
        index: usize,
        shadowed_by: String,
    },

    /// Table has no catch-all, so some paths select nothing
    #[error("Route table has no catch-all entry")]
    MissingCatchAll,
}
