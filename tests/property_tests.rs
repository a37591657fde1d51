//! Property-based tests for the closure computation.
//!
//! These tests use proptest to verify the loader's invariants hold across
//! randomly generated reference graphs.

use std::collections::{BTreeSet, VecDeque};

use proptest::prelude::*;
use tempfile::TempDir;

use unitclosure::core::eligibility::FrameworkFilter;
use unitclosure::core::registry::LoadedSet;
use unitclosure::core::types::UnitIdentity;
use unitclosure::host::mock::MockRuntime;
use unitclosure::host::HostRuntime;
use unitclosure::loader::{load_dependency_closure_in, ClosureOptions};

/// A random unit graph: names, adjacency lists, and preloaded roots.
#[derive(Debug, Clone)]
struct UnitGraph {
    names: Vec<String>,
    edges: Vec<Vec<usize>>,
    roots: Vec<usize>,
}

/// Strategy for unit names; roughly one in four is a framework unit.
fn unit_names(count: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(0u8..4, count).prop_map(|kinds| {
        kinds
            .into_iter()
            .enumerate()
            .map(|(i, kind)| {
                if kind == 0 {
                    format!("System.Unit{}", i)
                } else {
                    format!("Unit{}", i)
                }
            })
            .collect()
    })
}

/// Strategy for a graph with cycles, self references, and shared nodes allowed.
fn unit_graph() -> impl Strategy<Value = UnitGraph> {
    (1usize..10).prop_flat_map(|n| {
        (
            unit_names(n),
            prop::collection::vec(prop::collection::vec(0..n, 0..4), n),
            prop::collection::vec(0..n, 1..3),
        )
            .prop_map(|(names, edges, roots)| UnitGraph {
                names,
                edges,
                roots,
            })
    })
}

impl UnitGraph {
    fn runtime(&self) -> MockRuntime {
        let rt = MockRuntime::new();
        for (i, name) in self.names.iter().enumerate() {
            let refs: Vec<&str> = self.edges[i]
                .iter()
                .map(|&j| self.names[j].as_str())
                .collect();
            rt.add_unit(name, &refs);
        }
        for &root in &self.roots {
            rt.preload(&self.names[root]);
        }
        rt
    }

    /// Units the closure must contain: eligible units reachable from
    /// eligible roots through eligible units.
    fn expected_closure(
        &self,
        filter: &FrameworkFilter,
        include_framework: bool,
    ) -> BTreeSet<String> {
        let eligible = |i: usize| include_framework || !filter.is_framework(&self.names[i]);

        let mut seen = BTreeSet::new();
        let mut queue: VecDeque<usize> =
            self.roots.iter().copied().filter(|&r| eligible(r)).collect();
        while let Some(i) = queue.pop_front() {
            if !seen.insert(i) {
                continue;
            }
            for &j in &self.edges[i] {
                if eligible(j) && !seen.contains(&j) {
                    queue.push_back(j);
                }
            }
        }
        seen.into_iter().map(|i| self.names[i].clone()).collect()
    }
}

fn as_strings(ids: &[UnitIdentity]) -> BTreeSet<String> {
    ids.iter().map(|id| id.as_str().to_string()).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// The registry ends up holding exactly the reachable eligible units.
    #[test]
    fn closure_is_complete(graph in unit_graph(), include_framework in any::<bool>()) {
        let temp = TempDir::new().unwrap();
        let rt = graph.runtime();
        let options = ClosureOptions { include_framework, ..Default::default() };

        let report = load_dependency_closure_in(&rt, temp.path(), &options).unwrap();

        let expected = graph.expected_closure(&options.filter, include_framework);
        prop_assert_eq!(as_strings(&report.registered), expected.clone());
        for name in &expected {
            prop_assert!(rt.is_loaded(&UnitIdentity::new(name.as_str())));
        }
    }

    /// No identity is requested from the host more than once.
    #[test]
    fn each_unit_requested_at_most_once(graph in unit_graph()) {
        let temp = TempDir::new().unwrap();
        let rt = graph.runtime();

        load_dependency_closure_in(&rt, temp.path(), &ClosureOptions::default()).unwrap();

        for name in &graph.names {
            prop_assert!(rt.load_requests(name) <= 1, "{} requested twice", name);
        }
    }

    /// Excluded framework units are never requested or registered.
    #[test]
    fn framework_units_untouched_when_excluded(graph in unit_graph()) {
        let temp = TempDir::new().unwrap();
        let rt = graph.runtime();
        let options = ClosureOptions::default();

        let report = load_dependency_closure_in(&rt, temp.path(), &options).unwrap();

        for id in &report.registered {
            prop_assert!(!options.filter.is_framework(id.as_str()));
        }
        for name in graph.names.iter().filter(|n| options.filter.is_framework(n)) {
            prop_assert_eq!(rt.load_requests(name), 0);
        }
    }

    /// A second computation over the same host loads nothing new.
    #[test]
    fn second_computation_is_a_no_op(graph in unit_graph(), include_framework in any::<bool>()) {
        let temp = TempDir::new().unwrap();
        let rt = graph.runtime();
        let options = ClosureOptions { include_framework, ..Default::default() };

        let first = load_dependency_closure_in(&rt, temp.path(), &options).unwrap();
        rt.clear_operations();
        let second = load_dependency_closure_in(&rt, temp.path(), &options).unwrap();

        prop_assert_eq!(rt.total_load_requests(), 0);
        prop_assert_eq!(second.newly_loaded(), 0);
        prop_assert_eq!(second.registered, first.registered);
    }

    /// Registry inserts are idempotent regardless of order or repetition.
    #[test]
    fn registry_insert_idempotent(names in prop::collection::vec("[A-Za-z.]{1,12}", 0..20)) {
        let set = LoadedSet::new();
        for name in &names {
            set.insert(name.as_str());
        }
        for name in &names {
            prop_assert!(!set.insert(name.as_str()));
            prop_assert!(set.contains(name));
        }
        let distinct: BTreeSet<&String> = names.iter().collect();
        prop_assert_eq!(set.len(), distinct.len());
    }

    /// Classification only looks at the part before the first comma for
    /// exact names, and ignores case for prefixes.
    #[test]
    fn classification_ignores_attributes(
        name in "[A-Za-z]{1,10}",
        version in "[0-9]{1,3}\\.[0-9]{1,3}",
    ) {
        let filter = FrameworkFilter::default();
        let bare = filter.is_framework(&name);
        let qualified = format!("{}, Version={}", name, version);
        prop_assert_eq!(filter.is_framework(&qualified), bare);

        let prefixed = format!("system.{}", name);
        prop_assert!(filter.is_framework(&prefixed));
    }
}
