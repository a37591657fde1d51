//! loader::bulk
//!
//! Best-effort preload of every eligible unit file in one directory.
//!
//! # Behavior
//!
//! - Only files directly in the directory are considered (no recursion)
//! - Eligibility is decided from the file name on disk, before any load
//! - A file that fails to load is logged and recorded, and the scan goes on
//! - The registry is read but never written here

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};

use super::error::ClosureError;
use super::ClosureOptions;
use crate::core::eligibility::should_load;
use crate::core::registry::LoadedSet;
use crate::core::types::{UnitExtension, UnitIdentity};
use crate::host::HostRuntime;

/// A unit file whose load failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedFile {
    pub path: PathBuf,
    pub error: String,
}

/// What a directory preload did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BulkLoadOutcome {
    /// Units this preload loaded.
    pub loaded: Vec<UnitIdentity>,
    /// Units whose files were loaded earlier by someone else.
    pub already_loaded: Vec<UnitIdentity>,
    /// Files rejected by the eligibility filter.
    pub skipped: Vec<PathBuf>,
    /// Files that could not be loaded.
    pub failed: Vec<FailedFile>,
}

/// List unit files directly in `dir`, sorted by path.
pub fn list_unit_files(dir: &Path, extension: &UnitExtension) -> Result<Vec<PathBuf>, ClosureError> {
    let unreadable = |source| ClosureError::DirectoryUnreadable {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(unreadable)? {
        let path = entry.map_err(unreadable)?.path();
        let matches_ext = path
            .extension()
            .map(|e| e == extension.as_str())
            .unwrap_or(false);
        if matches_ext && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Load every eligible unit file found directly in `dir`.
///
/// # Errors
///
/// Only a failure to list the directory is an error. Individual files that
/// fail to load are reported in [`BulkLoadOutcome::failed`].
pub fn load_directory(
    runtime: &dyn HostRuntime,
    dir: &Path,
    registry: &LoadedSet,
    options: &ClosureOptions,
) -> Result<BulkLoadOutcome, ClosureError> {
    debug!(path = %dir.display(), "scanning unit directory");

    let mut outcome = BulkLoadOutcome::default();

    for path in list_unit_files(dir, &options.extension)? {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        if !should_load(&file_name, registry, &options.filter, options.include_framework) {
            debug!(file = %file_name, "skipping unit file");
            outcome.skipped.push(path);
            continue;
        }

        debug!(file = %file_name, "loading unit file");
        match runtime.load_from_path(&path) {
            Ok(load) if load.fresh => outcome.loaded.push(load.identity),
            Ok(load) => outcome.already_loaded.push(load.identity),
            Err(err) => {
                warn!(file = %path.display(), error = %err, "failed to load unit file");
                outcome.failed.push(FailedFile {
                    path,
                    error: err.to_string(),
                });
            }
        }
    }

    Ok(outcome)
}
