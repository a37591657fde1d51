//! loader::walker
//!
//! Depth-first expansion of the reference graph.
//!
//! # Algorithm
//!
//! For a loaded unit, each declared reference that passes the eligibility
//! filter is loaded, then expanded recursively, and only then registered
//! (post-order marking). A branch is fully resolved before its siblings.
//!
//! # Cycles
//!
//! The registry only learns about a unit after its subtree is done, so a
//! cycle would otherwise recurse forever. The walker keeps a separate
//! `visiting` set holding the current recursion path; a reference found there
//! is already being handled and is not followed.
//!
//! # Example
//!
//! ```
//! use unitclosure::core::eligibility::FrameworkFilter;
//! use unitclosure::core::registry::LoadedSet;
//! use unitclosure::host::mock::MockRuntime;
//! use unitclosure::loader::walker::ClosureWalker;
//!
//! let runtime = MockRuntime::new();
//! runtime.add_unit("A", &["B"]);
//! runtime.add_unit("B", &["A"]);
//! runtime.preload("A");
//!
//! let registry = LoadedSet::new();
//! let filter = FrameworkFilter::default();
//! let mut walker = ClosureWalker::new(&runtime, &registry, &filter, false);
//! walker.expand(&"A".into()).unwrap();
//!
//! assert!(registry.contains("B"));
//! assert_eq!(walker.loads_requested(), 1);
//! ```

use std::collections::HashSet;

use tracing::debug;

use super::error::ClosureError;
use crate::core::eligibility::{should_load, FrameworkFilter};
use crate::core::registry::LoadedSet;
use crate::core::types::UnitIdentity;
use crate::host::HostRuntime;

/// Recursive reference-closure walker for one closure computation.
pub struct ClosureWalker<'a> {
    runtime: &'a dyn HostRuntime,
    registry: &'a LoadedSet,
    filter: &'a FrameworkFilter,
    include_framework: bool,
    /// Units on the current recursion path.
    visiting: HashSet<UnitIdentity>,
    loads_requested: usize,
    units_loaded: usize,
}

impl<'a> ClosureWalker<'a> {
    /// Create a walker over `runtime`, recording progress in `registry`.
    pub fn new(
        runtime: &'a dyn HostRuntime,
        registry: &'a LoadedSet,
        filter: &'a FrameworkFilter,
        include_framework: bool,
    ) -> Self {
        Self {
            runtime,
            registry,
            filter,
            include_framework,
            visiting: HashSet::new(),
            loads_requested: 0,
            units_loaded: 0,
        }
    }

    /// Number of load requests this walker has made.
    pub fn loads_requested(&self) -> usize {
        self.loads_requested
    }

    /// Number of units this walker's requests actually loaded.
    ///
    /// Lower than [`loads_requested`](Self::loads_requested) when a reference
    /// resolves to a unit the host had already loaded under another spelling.
    pub fn units_loaded(&self) -> usize {
        self.units_loaded
    }

    /// Load and expand the full reference closure of a loaded unit.
    ///
    /// # Errors
    ///
    /// - [`ClosureError::MetadataUnavailable`] if a unit's references cannot
    ///   be read
    /// - [`ClosureError::UnloadableUnit`] if a referenced unit cannot be loaded
    ///
    /// Both abort the walk immediately.
    pub fn expand(&mut self, unit: &UnitIdentity) -> Result<(), ClosureError> {
        if !self.visiting.insert(unit.clone()) {
            return Ok(());
        }
        let result = self.expand_references(unit);
        self.visiting.remove(unit);
        result
    }

    fn expand_references(&mut self, unit: &UnitIdentity) -> Result<(), ClosureError> {
        let references =
            self.runtime
                .references(unit)
                .map_err(|source| ClosureError::MetadataUnavailable {
                    identity: unit.clone(),
                    source,
                })?;

        for reference in references {
            if self.visiting.contains(&reference)
                || !should_load(
                    reference.as_str(),
                    self.registry,
                    self.filter,
                    self.include_framework,
                )
            {
                continue;
            }

            self.loads_requested += 1;
            let loaded =
                self.runtime
                    .load(&reference)
                    .map_err(|source| ClosureError::UnloadableUnit {
                        identity: reference.clone(),
                        source,
                    })?;
            if loaded.fresh {
                self.units_loaded += 1;
            }

            // A reference may resolve to a differently spelled identity; keep
            // the spelling used here on the path too while the unit is walked.
            let alias =
                loaded.identity != reference && self.visiting.insert(reference.clone());
            let result = self.expand(&loaded.identity);
            if alias {
                self.visiting.remove(&reference);
            }
            result?;

            self.registry.insert(reference.clone());
            debug!(unit = %reference, "referenced unit loaded");
        }

        Ok(())
    }
}
