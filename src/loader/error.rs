//! loader::error
//!
//! Errors from the closure computation.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::types::UnitIdentity;
use crate::host::HostError;

/// Fatal errors from a closure computation.
///
/// Every variant aborts the computation. Log output up to the failure remains
/// as a diagnostic trail; no partial result is returned.
#[derive(Debug, Error)]
pub enum ClosureError {
    /// The host could not load a referenced unit.
    #[error("unable to load unit '{identity}'")]
    UnloadableUnit {
        identity: UnitIdentity,
        #[source]
        source: HostError,
    },

    /// The references of a loaded unit could not be read.
    #[error("references of unit '{identity}' are unavailable")]
    MetadataUnavailable {
        identity: UnitIdentity,
        #[source]
        source: HostError,
    },

    /// The unit directory could not be listed.
    #[error("failed to read unit directory '{path}'")]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The running program's directory could not be determined.
    #[error("cannot determine program directory: {0}")]
    ProgramDirectory(String),
}

impl ClosureError {
    /// The unit the failure is about, if any.
    pub fn identity(&self) -> Option<&UnitIdentity> {
        match self {
            ClosureError::UnloadableUnit { identity, .. }
            | ClosureError::MetadataUnavailable { identity, .. } => Some(identity),
            ClosureError::DirectoryUnreadable { .. } | ClosureError::ProgramDirectory(_) => None,
        }
    }
}
