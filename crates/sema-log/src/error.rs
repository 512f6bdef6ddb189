//! Error types for commit-log operations.

/// The result type used throughout sema-log.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while talking to the commit log.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The broker is unreachable or an operation against it failed.
    ///
    /// Transport errors are fatal at the call site; the core never retries
    /// them on behalf of the caller.
    #[error("transport error: {message}")]
    Transport {
        /// Description of the transport failure.
        message: String,
        /// The underlying broker error, if any.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A record payload could not be decoded.
    #[error("decode error: {message}")]
    Decode {
        /// Description of the decode failure.
        message: String,
    },

    /// A handler was registered twice for the same topic.
    #[error("a route for topic '{topic}' is already registered")]
    RouteExists {
        /// The doubly-registered topic.
        topic: String,
    },

    /// The tail has no routes, so there is nothing to subscribe to.
    #[error("cannot run a tail with no routes")]
    NoRoutes,
}

impl Error {
    /// Creates a new transport error.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new transport error with an underlying cause.
    #[must_use]
    pub fn transport_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Transport {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new decode error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}
