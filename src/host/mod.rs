//! host
//!
//! Abstraction over the running process's unit loader.
//!
//! # Architecture
//!
//! The closure loader reaches the host only through the [`HostRuntime`]
//! trait. Implementations:
//!
//! - [`ManifestRuntime`]: loads TOML unit manifests from probe directories
//! - [`mock::MockRuntime`]: in-memory graph for deterministic tests
//!
//! # Invariants
//!
//! - The loaded-unit table is append-only
//! - Loading an already-loaded unit has no effect beyond reporting it

mod manifest;
pub mod mock;
mod traits;

pub use manifest::{ManifestRuntime, UnitManifest};
pub use traits::{HostError, HostRuntime, LoadOutcome};
