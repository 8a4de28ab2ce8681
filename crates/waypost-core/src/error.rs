//! Error types for waypost-core

use thiserror::Error;

/// Result type alias for waypost operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error returned by a failing guard
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Error types for route configuration and navigation
#[derive(Debug, Error)]
pub enum Error {
    /// Route table construction or validation failure
    #[error(transparent)]
    Router(#[from] waypost_router::Error),

    /// `WrapOptions` built without a component
    #[error("Wrapped route has no component")]
    MissingComponent,

    /// Location that does not start with `/`
    #[error("Invalid location: {0}")]
    InvalidLocation(String),

    /// `pop` with nothing to go back to
    #[error("History is empty")]
    HistoryEmpty,
}
