//! loader::seed
//!
//! Register the units already loaded in the host before closure expansion.

use tracing::debug;

use crate::core::eligibility::{should_load, FrameworkFilter};
use crate::core::registry::LoadedSet;
use crate::host::HostRuntime;

/// Register every eligible unit currently loaded in the host.
///
/// Never loads anything. Returns the number of identities added.
pub fn seed_from_loaded(
    runtime: &dyn HostRuntime,
    registry: &LoadedSet,
    filter: &FrameworkFilter,
    include_framework: bool,
) -> usize {
    let mut added = 0;
    for identity in runtime.loaded_units() {
        if should_load(identity.as_str(), registry, filter, include_framework) {
            debug!(unit = %identity, "unit already loaded");
            if registry.insert(identity) {
                added += 1;
            }
        }
    }
    added
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::mock::MockRuntime;

    fn runtime() -> MockRuntime {
        let rt = MockRuntime::new();
        rt.preload("App");
        rt.preload("Lib");
        rt.preload("System.Runtime");
        rt
    }

    #[test]
    fn registers_application_units() {
        let rt = runtime();
        let registry = LoadedSet::new();

        let added = seed_from_loaded(&rt, &registry, &FrameworkFilter::default(), false);

        assert_eq!(added, 2);
        assert!(registry.contains("App"));
        assert!(registry.contains("Lib"));
        assert!(!registry.contains("System.Runtime"));
    }

    #[test]
    fn include_framework_registers_all() {
        let rt = runtime();
        let registry = LoadedSet::new();

        let added = seed_from_loaded(&rt, &registry, &FrameworkFilter::default(), true);
        assert_eq!(added, 3);
    }

    #[test]
    fn already_registered_units_are_not_counted() {
        let rt = runtime();
        let registry = LoadedSet::new();
        registry.insert("App");

        let added = seed_from_loaded(&rt, &registry, &FrameworkFilter::default(), false);
        assert_eq!(added, 1);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn never_loads() {
        let rt = runtime();
        seed_from_loaded(&rt, &LoadedSet::new(), &FrameworkFilter::default(), true);
        assert!(rt.operations().is_empty());
    }
}
