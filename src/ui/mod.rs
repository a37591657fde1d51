//! ui
//!
//! User-facing output.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//!
//! # Design
//!
//! Everything a command prints for the user goes through this module so that
//! quiet and JSON modes behave consistently.

pub mod output;
