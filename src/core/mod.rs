//! core
//!
//! Core domain types, rules, and configuration for unitclosure.
//!
//! # Modules
//!
//! - [`types`] - Strong types: UnitIdentity, UnitExtension
//! - [`eligibility`] - Framework classification and the load decision
//! - [`registry`] - The set of identities already handled
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Schemas are strict and self-describing
//! - Classification is deterministic and allocation-free

pub mod config;
pub mod eligibility;
pub mod registry;
pub mod types;
