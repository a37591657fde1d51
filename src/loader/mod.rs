//! loader
//!
//! Dependency-closure loading.
//!
//! # Lifecycle
//!
//! One closure computation runs three steps against a fresh [`LoadedSet`]:
//!
//! 1. **Bulk**: preload every eligible unit file in the program directory
//! 2. **Seed**: register every eligible unit now loaded in the host
//! 3. **Walk**: expand the references of every loaded unit, depth-first
//!
//! # Invariants
//!
//! - A unit identity is requested from the host at most once per computation
//! - With framework units excluded, no framework identity is registered or
//!   walked
//! - Bulk preload failures are logged and skipped; walk failures are fatal
//!
//! # Example
//!
//! ```
//! use unitclosure::host::mock::MockRuntime;
//! use unitclosure::loader::{load_dependency_closure_in, ClosureOptions};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let runtime = MockRuntime::new();
//! runtime.add_unit("App", &["Lib"]);
//! runtime.add_unit("Lib", &[]);
//! runtime.preload("App");
//!
//! let report =
//!     load_dependency_closure_in(&runtime, dir.path(), &ClosureOptions::default()).unwrap();
//! assert_eq!(report.walk_loaded, 1);
//! assert_eq!(report.registry_size, 2);
//! ```

pub mod bulk;
mod error;
pub mod seed;
pub mod walker;

pub use bulk::{load_directory, BulkLoadOutcome, FailedFile};
pub use error::ClosureError;
pub use seed::seed_from_loaded;
pub use walker::ClosureWalker;

use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use crate::core::eligibility::FrameworkFilter;
use crate::core::registry::LoadedSet;
use crate::core::types::{UnitExtension, UnitIdentity};
use crate::host::HostRuntime;

/// Settings for one closure computation.
#[derive(Debug, Clone, Default)]
pub struct ClosureOptions {
    /// Load and walk framework units too.
    pub include_framework: bool,
    /// Extension of unit files in the scanned directory.
    pub extension: UnitExtension,
    /// Framework classification rules.
    pub filter: FrameworkFilter,
}

/// Summary of a completed closure computation.
#[derive(Debug, Clone, Serialize)]
pub struct ClosureReport {
    /// Directory scanned by the bulk preload.
    pub directory: PathBuf,
    /// What the bulk preload did.
    pub bulk: BulkLoadOutcome,
    /// Identities registered while seeding.
    pub already_loaded: usize,
    /// Units loaded by the reference walk.
    pub walk_loaded: usize,
    /// Registry size at the end.
    pub registry_size: usize,
    /// Wall-clock duration in milliseconds.
    pub elapsed_ms: u64,
    /// Registered identities, sorted.
    pub registered: Vec<UnitIdentity>,
}

impl ClosureReport {
    /// Units newly loaded by this computation (bulk preload plus walk).
    pub fn newly_loaded(&self) -> usize {
        self.bulk.loaded.len() + self.walk_loaded
    }
}

/// Directory containing the running executable.
pub fn program_directory() -> Result<PathBuf, ClosureError> {
    let exe = std::env::current_exe().map_err(|e| ClosureError::ProgramDirectory(e.to_string()))?;
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| {
            ClosureError::ProgramDirectory(format!("'{}' has no parent", exe.display()))
        })
}

/// Load the full dependency closure, scanning the program's own directory.
///
/// # Errors
///
/// See [`load_dependency_closure_in`]; additionally fails with
/// [`ClosureError::ProgramDirectory`] if the executable's directory is unknown.
pub fn load_dependency_closure(
    runtime: &dyn HostRuntime,
    options: &ClosureOptions,
) -> Result<ClosureReport, ClosureError> {
    let dir = program_directory()?;
    load_dependency_closure_in(runtime, &dir, options)
}

/// Load the full dependency closure, scanning `dir` for unit files.
///
/// # Errors
///
/// - [`ClosureError::DirectoryUnreadable`] if `dir` cannot be listed
/// - [`ClosureError::UnloadableUnit`] / [`ClosureError::MetadataUnavailable`]
///   from the reference walk
pub fn load_dependency_closure_in(
    runtime: &dyn HostRuntime,
    dir: &Path,
    options: &ClosureOptions,
) -> Result<ClosureReport, ClosureError> {
    let started = Instant::now();
    let registry = LoadedSet::new();

    debug!(path = %dir.display(), "loading units from program directory");
    let bulk = load_directory(runtime, dir, &registry, options)?;

    let already_loaded =
        seed_from_loaded(runtime, &registry, &options.filter, options.include_framework);

    let roots: Vec<UnitIdentity> = runtime
        .loaded_units()
        .into_iter()
        .filter(|id| options.include_framework || !options.filter.is_framework(id.as_str()))
        .collect();

    let mut walker = ClosureWalker::new(
        runtime,
        &registry,
        &options.filter,
        options.include_framework,
    );
    for root in &roots {
        walker.expand(root)?;
    }
    let walk_loaded = walker.units_loaded();

    let elapsed_ms = started.elapsed().as_millis() as u64;
    info!(
        loaded = walk_loaded,
        preloaded = bulk.loaded.len(),
        elapsed_ms,
        "dependency closure loaded"
    );

    Ok(ClosureReport {
        directory: dir.to_path_buf(),
        bulk,
        already_loaded,
        walk_loaded,
        registry_size: registry.len(),
        elapsed_ms,
        registered: registry.identities(),
    })
}
