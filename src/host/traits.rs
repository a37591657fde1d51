//! host::traits
//!
//! Host runtime capability trait.
//!
//! # Design
//!
//! The closure loader never talks to a dynamic loader directly. Everything it
//! needs from the running process goes through [`HostRuntime`]:
//!
//! - list the units currently loaded
//! - load a unit by identity
//! - load a unit from a file on disk
//! - read the references a loaded unit declares
//!
//! Methods take `&self`; implementations own their loaded-unit table and must
//! be thread-safe (Send + Sync). The table is append-only: nothing is ever
//! unloaded.
//!
//! # Example
//!
//! ```
//! use unitclosure::host::mock::MockRuntime;
//! use unitclosure::core::types::UnitIdentity;
//! use unitclosure::host::HostRuntime;
//!
//! let runtime = MockRuntime::new();
//! runtime.add_unit("App", &["Lib"]);
//! runtime.add_unit("Lib", &[]);
//!
//! let outcome = runtime.load(&"App".into()).unwrap();
//! assert!(outcome.fresh);
//! assert_eq!(runtime.references(&outcome.identity).unwrap(), vec![UnitIdentity::new("Lib")]);
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::types::UnitIdentity;

/// Errors reported by a host runtime.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// No unit could be found for the identity.
    #[error("unit '{identity}' not found{}", format_tried(.tried))]
    NotFound {
        identity: UnitIdentity,
        tried: Vec<PathBuf>,
    },

    /// A unit file exists but cannot be understood.
    #[error("malformed unit '{path}': {message}")]
    Malformed { path: PathBuf, message: String },

    /// A unit was found but its version differs from the one requested.
    #[error("version mismatch: requested '{requested}', found '{found}'")]
    VersionMismatch {
        requested: UnitIdentity,
        found: UnitIdentity,
    },

    /// Reading a unit file failed.
    #[error("failed to read '{path}': {message}")]
    Io { path: PathBuf, message: String },

    /// The unit is not loaded, so its metadata cannot be read.
    #[error("unit '{0}' is not loaded")]
    NotLoaded(UnitIdentity),
}

fn format_tried(tried: &[PathBuf]) -> String {
    if tried.is_empty() {
        String::new()
    } else {
        let paths: Vec<String> = tried.iter().map(|p| p.display().to_string()).collect();
        format!(" (tried: {})", paths.join(", "))
    }
}

/// Result of a load request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOutcome {
    /// Identity of the unit now loaded.
    pub identity: UnitIdentity,
    /// `true` if this request loaded the unit; `false` if it was already loaded.
    pub fresh: bool,
}

impl LoadOutcome {
    /// Outcome for a unit this request loaded.
    pub fn fresh(identity: UnitIdentity) -> Self {
        Self {
            identity,
            fresh: true,
        }
    }

    /// Outcome for a unit that was already loaded.
    pub fn existing(identity: UnitIdentity) -> Self {
        Self {
            identity,
            fresh: false,
        }
    }
}

/// The running process's unit loader.
pub trait HostRuntime: Send + Sync {
    /// Identities of every unit currently loaded.
    fn loaded_units(&self) -> Vec<UnitIdentity>;

    /// Load a unit by identity.
    ///
    /// Loading an identity that is already loaded returns it with
    /// `fresh == false` and has no other effect.
    fn load(&self, identity: &UnitIdentity) -> Result<LoadOutcome, HostError>;

    /// Load the unit stored in a file.
    ///
    /// The identity comes from the file's contents, not its name.
    fn load_from_path(&self, path: &Path) -> Result<LoadOutcome, HostError>;

    /// Identities a loaded unit declares as references.
    fn references(&self, identity: &UnitIdentity) -> Result<Vec<UnitIdentity>, HostError>;

    /// Check whether a unit is loaded.
    ///
    /// Default implementation scans [`loaded_units`](Self::loaded_units).
    fn is_loaded(&self, identity: &UnitIdentity) -> bool {
        self.loaded_units().iter().any(|id| id == identity)
    }
}
