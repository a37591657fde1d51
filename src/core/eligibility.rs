//! core::eligibility
//!
//! Framework/application classification and the load eligibility filter.
//!
//! # Classification
//!
//! Every identity is either a *framework* unit (part of the platform the
//! program runs on) or an *application* unit. Classification is a static rule
//! over the identity string:
//!
//! - case-insensitive prefix match against [`DEFAULT_FRAMEWORK_PREFIXES`]
//! - case-sensitive exact match of the simple name against
//!   [`DEFAULT_FRAMEWORK_NAMES`]
//!
//! Both lists can be extended from configuration. Classification never fails:
//! anything that matches no rule, including empty or malformed identities, is
//! an application unit.
//!
//! # Example
//!
//! ```
//! use unitclosure::core::eligibility::{should_load, FrameworkFilter, UnitClass};
//! use unitclosure::core::registry::LoadedSet;
//!
//! let filter = FrameworkFilter::default();
//! assert_eq!(filter.classify("System.Core"), UnitClass::Framework);
//! assert_eq!(filter.classify("App"), UnitClass::Application);
//!
//! let registry = LoadedSet::new();
//! assert!(should_load("App", &registry, &filter, false));
//! assert!(!should_load("System.Core", &registry, &filter, false));
//! assert!(should_load("System.Core", &registry, &filter, true));
//! ```

use std::fmt;

use serde::Serialize;

use super::registry::LoadedSet;
use super::types::simple_name_of;

/// Identity prefixes of known framework namespaces.
pub const DEFAULT_FRAMEWORK_PREFIXES: &[&str] =
    &["Microsoft.", "System.", "Newtonsoft.", "Autofac"];

/// Simple names of known framework-equivalent units.
pub const DEFAULT_FRAMEWORK_NAMES: &[&str] = &["netstandard"];

/// Classification of a unit identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitClass {
    Framework,
    Application,
}

impl fmt::Display for UnitClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitClass::Framework => f.write_str("framework"),
            UnitClass::Application => f.write_str("application"),
        }
    }
}

/// Static framework classification rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameworkFilter {
    prefixes: Vec<String>,
    names: Vec<String>,
}

impl Default for FrameworkFilter {
    fn default() -> Self {
        Self {
            prefixes: DEFAULT_FRAMEWORK_PREFIXES
                .iter()
                .map(|p| p.to_string())
                .collect(),
            names: DEFAULT_FRAMEWORK_NAMES.iter().map(|n| n.to_string()).collect(),
        }
    }
}

impl FrameworkFilter {
    /// Create the default rules extended with extra prefixes and names.
    pub fn with_extra<P, N>(prefixes: P, names: N) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
        N: IntoIterator,
        N::Item: Into<String>,
    {
        let mut filter = Self::default();
        for prefix in prefixes {
            let prefix = prefix.into();
            if !filter.prefixes.contains(&prefix) {
                filter.prefixes.push(prefix);
            }
        }
        for name in names {
            let name = name.into();
            if !filter.names.contains(&name) {
                filter.names.push(name);
            }
        }
        filter
    }

    /// The prefix rules, in match order.
    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    /// The exact-name rules.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Classify an identity.
    pub fn classify(&self, identity: &str) -> UnitClass {
        if self.is_framework(identity) {
            UnitClass::Framework
        } else {
            UnitClass::Application
        }
    }

    /// Check whether an identity is a framework unit.
    pub fn is_framework(&self, identity: &str) -> bool {
        let by_prefix = self
            .prefixes
            .iter()
            .any(|prefix| starts_with_ignore_case(identity, prefix));

        by_prefix || {
            let simple = simple_name_of(identity);
            self.names.iter().any(|name| name == simple)
        }
    }
}

/// Decide whether a unit should be loaded.
///
/// Returns `false` if the identity is already registered, or if it is a
/// framework unit and `include_framework` is off.
pub fn should_load(
    identity: &str,
    registry: &LoadedSet,
    filter: &FrameworkFilter,
    include_framework: bool,
) -> bool {
    (include_framework || !filter.is_framework(identity)) && !registry.contains(identity)
}

fn starts_with_ignore_case(value: &str, prefix: &str) -> bool {
    value
        .as_bytes()
        .get(..prefix.len())
        .map(|head| head.eq_ignore_ascii_case(prefix.as_bytes()))
        .unwrap_or(false)
}
