//! Error types for the registry view.

use sema_core::{Alias, SchemaId};

/// The result type used throughout sema-registry.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in registry operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An encode/decode/describe was requested for an unknown schema.
    ///
    /// The schema may simply not have been consumed yet; this is a
    /// per-request condition, never a process-level fault.
    #[error("schema not present: {schema_id}")]
    SchemaNotPresent {
        /// The schema that is not (yet) in the view.
        schema_id: SchemaId,
    },

    /// A versioned operation referenced an alias the view does not know.
    #[error("alias not present: {alias}")]
    AliasNotPresent {
        /// The alias that is not (yet) in the view.
        alias: Alias,
    },

    /// A specification does not parse as Avro.
    #[error("invalid schema specification: {message}")]
    InvalidSpec {
        /// The Avro parser's complaint.
        message: String,
    },

    /// The Avro codec rejected a datum.
    #[error("codec error: {message}")]
    Codec {
        /// Description of the conversion failure.
        message: String,
    },

    /// A record payload was not a well-formed update.
    #[error("malformed update record: {message}")]
    MalformedRecord {
        /// Description of the decode failure.
        message: String,
    },

    /// An update could not be serialized for publishing.
    #[error("serialization error: {message}")]
    Serialization {
        /// Description of the serialization failure.
        message: String,
    },

    /// An error from the commit-log layer.
    #[error(transparent)]
    Log(#[from] sema_log::Error),

    /// An error from the core primitives.
    #[error(transparent)]
    Core(#[from] sema_core::Error),
}

impl Error {
    /// Creates a new malformed-record error.
    #[must_use]
    pub fn malformed_record(message: impl Into<String>) -> Self {
        Self::MalformedRecord {
            message: message.into(),
        }
    }

    /// Creates a new codec error.
    #[must_use]
    pub fn codec(message: impl Into<String>) -> Self {
        Self::Codec {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_present_names_the_schema() {
        let id = SchemaId::generate();
        let err = Error::SchemaNotPresent { schema_id: id };
        assert!(err.to_string().contains(&id.to_string()));
    }

    #[test]
    fn alias_not_present_names_the_alias() {
        let err = Error::AliasNotPresent {
            alias: Alias::new("events-v0"),
        };
        assert!(err.to_string().contains("events-v0"));
    }

    #[test]
    fn log_errors_convert() {
        let err: Error = sema_log::Error::decode("bad payload").into();
        assert!(err.to_string().contains("bad payload"));
    }
}
