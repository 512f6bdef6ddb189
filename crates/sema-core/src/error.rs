//! Shared error types.

/// The result type used throughout sema-core.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the core primitives.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An identifier failed to parse.
    #[error("{message}")]
    InvalidId {
        /// Description of the parse failure.
        message: String,
    },

    /// A versioned alias failed to parse.
    #[error(transparent)]
    InvalidVersion(#[from] crate::version::ParseVersionError),

    /// A configuration value is missing or malformed.
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the configuration problem.
        message: String,
    },
}

impl Error {
    /// Creates a new configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}
