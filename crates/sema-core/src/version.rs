//! Linear versioning scheme for aliased schemata.
//!
//! A versioned schema is addressed by an alias of the form `name-v<hex>`,
//! where `<hex>` is the version number rendered in lowercase hexadecimal
//! with no prefix. Version `0` is the **origin**, the first version of a
//! named schema. Versions increase linearly by one; there is no upper
//! bound.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::alias::Alias;

/// Separator between the name and the hex version in a versioned alias.
const VERSION_MARKER: &str = "-v";

/// Error returned when a string does not parse as a versioned alias.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid versioned alias '{input}': {reason}")]
pub struct ParseVersionError {
    /// The string that failed to parse.
    pub input: String,
    /// Why it failed.
    pub reason: &'static str,
}

impl ParseVersionError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }
}

/// A plain-text addressable, linearly versioned schema name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NameVersion {
    /// The plain-text name shared by all versions.
    pub name: String,
    /// The version number, starting at 0.
    pub version: u64,
}

impl NameVersion {
    /// Creates a version with the given name and version number.
    #[must_use]
    pub fn new(name: impl Into<String>, version: u64) -> Self {
        Self {
            name: name.into(),
            version,
        }
    }

    /// Creates the origin (version 0) for the given name.
    #[must_use]
    pub fn origin(name: impl Into<String>) -> Self {
        Self::new(name, 0)
    }

    /// Returns true when this is the first version of the name.
    #[must_use]
    pub fn is_origin(&self) -> bool {
        self.version == 0
    }

    /// Returns the version preceding this one, or `None` at the origin.
    #[must_use]
    pub fn previous(&self) -> Option<Self> {
        self.version
            .checked_sub(1)
            .map(|version| Self::new(self.name.clone(), version))
    }

    /// Returns the version succeeding this one.
    ///
    /// There is no upper bound on versions; this never fails.
    #[must_use]
    pub fn next(&self) -> Self {
        Self::new(self.name.clone(), self.version + 1)
    }

    /// Renders this version as an [`Alias`].
    #[must_use]
    pub fn alias(&self) -> Alias {
        Alias::new(self.to_string())
    }

    /// Parses a versioned alias.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseVersionError`] when the alias is not in the
    /// `name-v<hex>` format.
    pub fn from_alias(alias: &Alias) -> Result<Self, ParseVersionError> {
        alias.as_str().parse()
    }
}

impl fmt::Display for NameVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{:x}", self.name, VERSION_MARKER, self.version)
    }
}

impl FromStr for NameVersion {
    type Err = ParseVersionError;

    /// Parses `name-v<hex>` into a [`NameVersion`].
    ///
    /// The split happens at the **last** occurrence of `-v`, so a name may
    /// itself contain `-v` (`a-very-fine-v3` parses as name `a-very-fine`,
    /// version 3). A string whose trailing segment is not valid hex, or
    /// whose name part is empty, does not parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let marker = s
            .rfind(VERSION_MARKER)
            .ok_or_else(|| ParseVersionError::new(s, "missing version marker"))?;
        let (name, rest) = s.split_at(marker);
        let hex = &rest[VERSION_MARKER.len()..];

        if name.is_empty() {
            return Err(ParseVersionError::new(s, "empty name"));
        }
        let version = u64::from_str_radix(hex, 16)
            .map_err(|_| ParseVersionError::new(s, "version is not hexadecimal"))?;

        Ok(Self::new(name, version))
    }
}
