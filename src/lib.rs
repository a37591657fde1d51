//! unitclosure - Load the full dependency closure of code units
//!
//! Given a directory of unit files, unitclosure preloads every eligible unit
//! it finds and then follows the declared references of every loaded unit
//! until nothing new remains. Framework units are excluded by default.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to loader)
//! - [`loader`] - Bulk preload, seeding, and the reference walk
//! - [`host`] - The runtime capability the loader drives, with manifest and
//!   mock implementations
//! - [`core`] - Identity types, eligibility rules, the loaded set, and config
//! - [`ui`] - User-facing output
//!
//! # Correctness Invariants
//!
//! 1. A unit identity is requested from the host at most once per computation
//! 2. A unit is only ever registered, never unregistered
//! 3. Excluded framework units are neither loaded nor walked
//! 4. The walk terminates on cyclic reference graphs

pub mod cli;
pub mod core;
pub mod host;
pub mod loader;
pub mod ui;
