//! Plain-text aliases for schemata.
//!
//! An alias is a human-readable label bound to a [`SchemaId`] through the
//! alias topic. Aliases that follow the `name-v<hex>` convention are
//! additionally interpretable as a [`crate::version::NameVersion`].
//!
//! [`SchemaId`]: crate::id::SchemaId

use serde::{Deserialize, Serialize};
use std::fmt;

/// A plain-text name for a schema.
///
/// Aliases are used for plain-text addressing of schemata. They are
/// free-form labels; only the versioning scheme constrains their shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Alias(String);

impl Alias {
    /// Creates an alias from the given label.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Returns the alias as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true when the alias is the empty string.
    ///
    /// Empty aliases are never produced by well-formed writers, but the
    /// log is not validated on the way in, so readers must tolerate them.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Alias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Alias {
    fn from(label: String) -> Self {
        Self(label)
    }
}

impl From<&str> for Alias {
    fn from(label: &str) -> Self {
        Self(label.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alias_display_matches_label() {
        let alias = Alias::new("user-profile-v2");
        assert_eq!(alias.to_string(), "user-profile-v2");
        assert_eq!(alias.as_str(), "user-profile-v2");
    }

    #[test]
    fn alias_serde_is_transparent() {
        let alias = Alias::new("metrics");
        let json = serde_json::to_string(&alias).unwrap();
        assert_eq!(json, "\"metrics\"");
        let back: Alias = serde_json::from_str(&json).unwrap();
        assert_eq!(back, alias);
    }

    #[test]
    fn empty_alias_is_detected() {
        assert!(Alias::new("").is_empty());
        assert!(!Alias::new("x").is_empty());
    }
}
