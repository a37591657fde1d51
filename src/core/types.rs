//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`UnitIdentity`] - Opaque identity string of a loadable unit
//! - [`UnitExtension`] - Validated file extension for unit files
//!
//! # Identity
//!
//! A unit identity names a unit within the host runtime (name, version and
//! origin). Its exact format is owned by the host; equality is exact string
//! match and no normalization is performed. Any string, including the empty
//! string, is a representable identity so that classification stays total.
//!
//! # Examples
//!
//! ```
//! use unitclosure::core::types::{UnitExtension, UnitIdentity};
//!
//! let id = UnitIdentity::new("Lib, Version=1.0.0");
//! assert_eq!(id.simple_name(), "Lib");
//! assert_eq!(id.version(), Some("1.0.0"));
//!
//! assert!(UnitExtension::new("unit").is_ok());
//! assert!(UnitExtension::new(".unit").is_err());
//! ```

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid unit extension: {0}")]
    InvalidExtension(String),
}

/// The identity of a loadable unit.
///
/// Identities are compared exactly. Structured accessors such as
/// [`simple_name`](Self::simple_name) never fail; on unexpected input they
/// degrade to returning the raw string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitIdentity(String);

impl UnitIdentity {
    /// Create an identity from any string.
    pub fn new(identity: impl Into<String>) -> Self {
        Self(identity.into())
    }

    /// Build the identity for a unit with the given name and optional version.
    ///
    /// ```
    /// use unitclosure::core::types::UnitIdentity;
    ///
    /// assert_eq!(UnitIdentity::from_parts("App", None).as_str(), "App");
    /// assert_eq!(
    ///     UnitIdentity::from_parts("App", Some("2.1.0")).as_str(),
    ///     "App, Version=2.1.0"
    /// );
    /// ```
    pub fn from_parts(name: &str, version: Option<&str>) -> Self {
        match version {
            Some(v) => Self(format!("{}, Version={}", name, v)),
            None => Self(name.to_string()),
        }
    }

    /// Get the identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The part of the identity before the first `,`, trimmed.
    pub fn simple_name(&self) -> &str {
        simple_name_of(&self.0)
    }

    /// The `Version=` attribute of the identity, if present.
    pub fn version(&self) -> Option<&str> {
        self.0.split(',').skip(1).find_map(|attr| {
            let (key, value) = attr.split_once('=')?;
            if key.trim().eq_ignore_ascii_case("version") {
                Some(value.trim())
            } else {
                None
            }
        })
    }
}

impl fmt::Display for UnitIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UnitIdentity {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for UnitIdentity {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for UnitIdentity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for UnitIdentity {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// The simple name of a raw identity string: the part before the first `,`,
/// trimmed.
pub fn simple_name_of(identity: &str) -> &str {
    identity.split(',').next().unwrap_or("").trim()
}

/// A validated file extension for unit files, stored without a leading dot.
///
/// Extensions cannot be empty and cannot contain `.`, `/` or `\`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UnitExtension(String);

impl UnitExtension {
    /// The extension used when nothing is configured.
    pub const DEFAULT: &'static str = "unit";

    /// Create a new validated extension.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidExtension` for empty values or values
    /// containing a dot or path separator.
    pub fn new(ext: impl Into<String>) -> Result<Self, TypeError> {
        let ext = ext.into();
        if ext.is_empty() {
            return Err(TypeError::InvalidExtension(
                "extension cannot be empty".into(),
            ));
        }
        if ext.contains(['.', '/', '\\']) {
            return Err(TypeError::InvalidExtension(format!(
                "extension '{}' cannot contain '.', '/' or '\\'",
                ext
            )));
        }
        Ok(Self(ext))
    }

    /// Get the extension as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for UnitExtension {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl TryFrom<String> for UnitExtension {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UnitExtension> for String {
    fn from(value: UnitExtension) -> Self {
        value.0
    }
}

impl fmt::Display for UnitExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
