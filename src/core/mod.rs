//! core
//!
//! Core value types and configuration for the clock lattice.
//!
//! # Modules
//!
//! - [`scalar`] - BigScalar and GroupOrder
//! - [`lattice`] - 13-D lattice points and the π·φ metric
//! - [`types`] - Strong types: Solid, SolidSet, Fingerprint
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Values are plain data passed by copy or clone
//! - Schemas are strict and self-describing
//! - All computation is deterministic

pub mod config;
pub mod lattice;
pub mod scalar;
pub mod types;
