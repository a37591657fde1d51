//! host::mock
//!
//! In-memory host runtime for deterministic testing.
//!
//! # Design
//!
//! The mock runtime holds a synthetic reference graph of *available* units
//! and a table of *loaded* units. Loading an available unit moves it into the
//! loaded table. Every request is recorded so tests can assert how often a
//! unit was asked for. Failures can be injected per identity.
//!
//! # Example
//!
//! ```
//! use unitclosure::host::mock::{MockOperation, MockRuntime};
//! use unitclosure::host::HostRuntime;
//!
//! let runtime = MockRuntime::new();
//! runtime.add_unit("App", &["Lib"]);
//! runtime.add_unit("Lib", &[]);
//! runtime.preload("App");
//!
//! runtime.load(&"Lib".into()).unwrap();
//! assert_eq!(runtime.load_requests("Lib"), 1);
//! assert!(matches!(runtime.operations()[0], MockOperation::Load { .. }));
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

use super::traits::{HostError, HostRuntime, LoadOutcome};
use crate::core::types::UnitIdentity;

/// Mock host runtime for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping; clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockRuntime {
    inner: Arc<Mutex<MockRuntimeInner>>,
}

#[derive(Debug, Default)]
struct MockRuntimeInner {
    /// Units that can be loaded, with their references.
    available: HashMap<UnitIdentity, Vec<UnitIdentity>>,
    /// Unit files: path -> identity stored in the file.
    files: HashMap<PathBuf, UnitIdentity>,
    /// Loaded units in load order.
    loaded: Vec<UnitIdentity>,
    /// Injected load failures.
    fail_load: HashMap<UnitIdentity, HostError>,
    /// Injected metadata failures.
    fail_references: HashMap<UnitIdentity, HostError>,
    /// Recorded operations for verification.
    operations: Vec<MockOperation>,
}

/// Recorded operation for test verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOperation {
    Load { identity: UnitIdentity },
    LoadFromPath { path: PathBuf },
    References { identity: UnitIdentity },
}

impl MockRuntime {
    /// Create a new empty mock runtime.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make a unit available for loading.
    pub fn add_unit(&self, identity: &str, references: &[&str]) {
        let mut inner = self.inner.lock();
        inner.available.insert(
            identity.into(),
            references.iter().map(|r| UnitIdentity::new(*r)).collect(),
        );
    }

    /// Register a unit file; loading the path yields `identity`.
    pub fn add_file(&self, path: impl Into<PathBuf>, identity: &str) {
        let mut inner = self.inner.lock();
        inner.files.insert(path.into(), identity.into());
    }

    /// Mark an available unit as already loaded, without recording a request.
    ///
    /// Units not previously added become available with no references.
    pub fn preload(&self, identity: &str) {
        let mut inner = self.inner.lock();
        let identity = UnitIdentity::new(identity);
        inner.available.entry(identity.clone()).or_default();
        if !inner.loaded.contains(&identity) {
            inner.loaded.push(identity);
        }
    }

    /// Fail every load of `identity` with `error`.
    pub fn fail_load(&self, identity: &str, error: HostError) {
        self.inner.lock().fail_load.insert(identity.into(), error);
    }

    /// Fail every reference lookup of `identity` with `error`.
    pub fn fail_references(&self, identity: &str, error: HostError) {
        self.inner
            .lock()
            .fail_references
            .insert(identity.into(), error);
    }

    /// Get all recorded operations.
    pub fn operations(&self) -> Vec<MockOperation> {
        self.inner.lock().operations.clone()
    }

    /// Clear recorded operations.
    pub fn clear_operations(&self) {
        self.inner.lock().operations.clear();
    }

    /// Number of load-by-identity requests recorded for `identity`.
    pub fn load_requests(&self, identity: &str) -> usize {
        let identity = UnitIdentity::new(identity);
        self.inner
            .lock()
            .operations
            .iter()
            .filter(|op| matches!(op, MockOperation::Load { identity: id } if *id == identity))
            .count()
    }

    /// Total number of load requests of either kind.
    pub fn total_load_requests(&self) -> usize {
        self.inner
            .lock()
            .operations
            .iter()
            .filter(|op| !matches!(op, MockOperation::References { .. }))
            .count()
    }

    fn mark_loaded(inner: &mut MockRuntimeInner, identity: &UnitIdentity) -> LoadOutcome {
        if inner.loaded.contains(identity) {
            LoadOutcome::existing(identity.clone())
        } else {
            inner.loaded.push(identity.clone());
            LoadOutcome::fresh(identity.clone())
        }
    }
}

impl HostRuntime for MockRuntime {
    fn loaded_units(&self) -> Vec<UnitIdentity> {
        self.inner.lock().loaded.clone()
    }

    fn load(&self, identity: &UnitIdentity) -> Result<LoadOutcome, HostError> {
        let mut inner = self.inner.lock();
        inner.operations.push(MockOperation::Load {
            identity: identity.clone(),
        });

        if let Some(err) = inner.fail_load.get(identity) {
            return Err(err.clone());
        }
        if !inner.available.contains_key(identity) {
            return Err(HostError::NotFound {
                identity: identity.clone(),
                tried: Vec::new(),
            });
        }

        Ok(Self::mark_loaded(&mut inner, identity))
    }

    fn load_from_path(&self, path: &Path) -> Result<LoadOutcome, HostError> {
        let mut inner = self.inner.lock();
        inner.operations.push(MockOperation::LoadFromPath {
            path: path.to_path_buf(),
        });

        let identity = inner.files.get(path).cloned().ok_or_else(|| HostError::Io {
            path: path.to_path_buf(),
            message: "no such file".to_string(),
        })?;

        if let Some(err) = inner.fail_load.get(&identity) {
            return Err(err.clone());
        }
        inner.available.entry(identity.clone()).or_default();

        Ok(Self::mark_loaded(&mut inner, &identity))
    }

    fn references(&self, identity: &UnitIdentity) -> Result<Vec<UnitIdentity>, HostError> {
        let mut inner = self.inner.lock();
        inner.operations.push(MockOperation::References {
            identity: identity.clone(),
        });

        if let Some(err) = inner.fail_references.get(identity) {
            return Err(err.clone());
        }
        if !inner.loaded.contains(identity) {
            return Err(HostError::NotLoaded(identity.clone()));
        }

        Ok(inner.available.get(identity).cloned().unwrap_or_default())
    }

    fn is_loaded(&self, identity: &UnitIdentity) -> bool {
        self.inner.lock().loaded.contains(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_available_unit() {
        let rt = MockRuntime::new();
        rt.add_unit("Lib", &[]);

        let outcome = rt.load(&"Lib".into()).unwrap();
        assert!(outcome.fresh);
        assert!(rt.is_loaded(&"Lib".into()));
        assert!(!rt.load(&"Lib".into()).unwrap().fresh);
        assert_eq!(rt.load_requests("Lib"), 2);
    }

    #[test]
    fn load_unknown_unit_fails() {
        let rt = MockRuntime::new();
        assert!(matches!(
            rt.load(&"Ghost".into()),
            Err(HostError::NotFound { .. })
        ));
        assert!(rt.loaded_units().is_empty());
    }

    #[test]
    fn preload_is_not_recorded() {
        let rt = MockRuntime::new();
        rt.preload("App");
        assert_eq!(rt.loaded_units(), vec![UnitIdentity::new("App")]);
        assert!(rt.operations().is_empty());
    }

    #[test]
    fn load_from_path_uses_registered_identity() {
        let rt = MockRuntime::new();
        rt.add_file("/app/renamed.unit", "App");

        let outcome = rt.load_from_path(Path::new("/app/renamed.unit")).unwrap();
        assert_eq!(outcome.identity.as_str(), "App");
        assert!(rt.load_from_path(Path::new("/app/other.unit")).is_err());
    }

    #[test]
    fn injected_failures() {
        let rt = MockRuntime::new();
        rt.add_unit("Lib", &[]);
        rt.preload("App");
        rt.fail_load(
            "Lib",
            HostError::Malformed {
                path: PathBuf::from("Lib.unit"),
                message: "bad".into(),
            },
        );
        rt.fail_references("App", HostError::NotLoaded("App".into()));

        assert!(matches!(
            rt.load(&"Lib".into()),
            Err(HostError::Malformed { .. })
        ));
        assert!(rt.references(&"App".into()).is_err());
    }

    #[test]
    fn references_require_loaded_unit() {
        let rt = MockRuntime::new();
        rt.add_unit("App", &["Lib"]);
        assert!(rt.references(&"App".into()).is_err());

        rt.load(&"App".into()).unwrap();
        assert_eq!(
            rt.references(&"App".into()).unwrap(),
            vec![UnitIdentity::new("Lib")]
        );
    }

    #[test]
    fn clones_share_state() {
        let rt = MockRuntime::new();
        let other = rt.clone();
        other.preload("App");
        assert!(rt.is_loaded(&"App".into()));
    }
}
