//! host::manifest
//!
//! Host runtime backed by TOML unit manifests on disk.
//!
//! # Unit Files
//!
//! Each unit is a single file named `<name>.<extension>` containing:
//!
//! ```toml
//! name = "App"
//! version = "1.0.0"
//! references = ["Lib, Version=1.0.0", "System.Core"]
//! ```
//!
//! `version` and `references` are optional. The unit's identity is
//! `"<name>, Version=<version>"`, or just `"<name>"` without a version.
//!
//! # Resolution
//!
//! Loading by identity first consults the loaded-unit table. A bare name
//! (no attributes) also matches a loaded unit with the same simple name.
//! Otherwise each probe directory is searched in order for
//! `<simple name>.<extension>`. A requested version must match the manifest's
//! version exactly.
//!
//! # Example
//!
//! ```no_run
//! use std::path::PathBuf;
//! use unitclosure::core::types::UnitExtension;
//! use unitclosure::host::{HostRuntime, ManifestRuntime};
//!
//! let runtime = ManifestRuntime::new(vec![PathBuf::from("/opt/app")], UnitExtension::default());
//! let app = runtime.load(&"App".into()).unwrap();
//! for reference in runtime.references(&app.identity).unwrap() {
//!     println!("{}", reference);
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use super::traits::{HostError, HostRuntime, LoadOutcome};
use crate::core::types::{UnitExtension, UnitIdentity};

/// Contents of a unit file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnitManifest {
    /// Unit name
    pub name: String,

    /// Unit version
    #[serde(default)]
    pub version: Option<String>,

    /// Identities this unit references
    #[serde(default)]
    pub references: Vec<String>,
}

impl UnitManifest {
    /// The identity this manifest describes.
    pub fn identity(&self) -> UnitIdentity {
        UnitIdentity::from_parts(&self.name, self.version.as_deref())
    }

    /// Read and parse a unit file.
    pub fn read(path: &Path) -> Result<Self, HostError> {
        let contents = fs::read_to_string(path).map_err(|e| HostError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let manifest: UnitManifest = toml::from_str(&contents).map_err(|e| HostError::Malformed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        if manifest.name.trim().is_empty() {
            return Err(HostError::Malformed {
                path: path.to_path_buf(),
                message: "unit name cannot be empty".to_string(),
            });
        }
        if manifest.name.contains(',') {
            return Err(HostError::Malformed {
                path: path.to_path_buf(),
                message: format!("unit name '{}' cannot contain ','", manifest.name),
            });
        }

        Ok(manifest)
    }
}

/// A unit in the loaded-unit table.
#[derive(Debug, Clone)]
struct LoadedUnit {
    path: PathBuf,
    references: Vec<UnitIdentity>,
}

/// Host runtime that loads unit manifests from probe directories.
#[derive(Debug)]
pub struct ManifestRuntime {
    probe_paths: Vec<PathBuf>,
    extension: UnitExtension,
    loaded: RwLock<BTreeMap<UnitIdentity, LoadedUnit>>,
}

impl ManifestRuntime {
    /// Create a runtime with nothing loaded.
    pub fn new(probe_paths: Vec<PathBuf>, extension: UnitExtension) -> Self {
        Self {
            probe_paths,
            extension,
            loaded: RwLock::new(BTreeMap::new()),
        }
    }

    /// Directories searched when loading by identity, in order.
    pub fn probe_paths(&self) -> &[PathBuf] {
        &self.probe_paths
    }

    /// Extension of unit files.
    pub fn extension(&self) -> &UnitExtension {
        &self.extension
    }

    /// The file a loaded unit came from.
    pub fn origin(&self, identity: &UnitIdentity) -> Option<PathBuf> {
        self.loaded.read().get(identity).map(|u| u.path.clone())
    }

    fn find_loaded(&self, identity: &UnitIdentity) -> Option<UnitIdentity> {
        let loaded = self.loaded.read();
        if loaded.contains_key(identity) {
            return Some(identity.clone());
        }

        // A bare name resolves to whichever version is already loaded.
        let simple = identity.simple_name();
        if identity.as_str().trim() != simple {
            return None;
        }
        loaded
            .keys()
            .find(|id| id.simple_name() == simple)
            .cloned()
    }

    fn insert(&self, manifest: UnitManifest, path: &Path) -> LoadOutcome {
        let identity = manifest.identity();
        let mut loaded = self.loaded.write();
        if loaded.contains_key(&identity) {
            return LoadOutcome::existing(identity);
        }
        loaded.insert(
            identity.clone(),
            LoadedUnit {
                path: path.to_path_buf(),
                references: manifest.references.into_iter().map(UnitIdentity::from).collect(),
            },
        );
        LoadOutcome::fresh(identity)
    }
}

/// A simple name usable as a file stem inside a probe directory.
fn is_file_stem(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

impl HostRuntime for ManifestRuntime {
    fn loaded_units(&self) -> Vec<UnitIdentity> {
        self.loaded.read().keys().cloned().collect()
    }

    fn load(&self, identity: &UnitIdentity) -> Result<LoadOutcome, HostError> {
        if let Some(existing) = self.find_loaded(identity) {
            return Ok(LoadOutcome::existing(existing));
        }

        let simple = identity.simple_name();
        if !is_file_stem(simple) {
            return Err(HostError::NotFound {
                identity: identity.clone(),
                tried: Vec::new(),
            });
        }

        let file_name = format!("{}.{}", simple, self.extension);
        let mut tried = Vec::new();

        for dir in &self.probe_paths {
            let candidate = dir.join(&file_name);
            if !candidate.is_file() {
                tried.push(candidate);
                continue;
            }

            let manifest = UnitManifest::read(&candidate)?;
            if manifest.name != simple {
                return Err(HostError::Malformed {
                    path: candidate,
                    message: format!("declares name '{}', expected '{}'", manifest.name, simple),
                });
            }

            let found = manifest.identity();
            if let Some(requested) = identity.version() {
                if manifest.version.as_deref() != Some(requested) {
                    return Err(HostError::VersionMismatch {
                        requested: identity.clone(),
                        found,
                    });
                }
            }

            return Ok(self.insert(manifest, &candidate));
        }

        Err(HostError::NotFound {
            identity: identity.clone(),
            tried,
        })
    }

    fn load_from_path(&self, path: &Path) -> Result<LoadOutcome, HostError> {
        let manifest = UnitManifest::read(path)?;
        Ok(self.insert(manifest, path))
    }

    fn references(&self, identity: &UnitIdentity) -> Result<Vec<UnitIdentity>, HostError> {
        self.loaded
            .read()
            .get(identity)
            .map(|u| u.references.clone())
            .ok_or_else(|| HostError::NotLoaded(identity.clone()))
    }

    fn is_loaded(&self, identity: &UnitIdentity) -> bool {
        self.loaded.read().contains_key(identity)
    }
}
