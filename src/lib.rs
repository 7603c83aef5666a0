//! clocklattice - A geometric scalar-recovery engine
//!
//! Given a point `Q` on a named elliptic curve, clocklattice produces a
//! candidate scalar `k̂` and a calibrated confidence by searching a
//! precomputed anchor structure: Platonic-solid vertices embedded in 13
//! dimensions, their shared vertices, and a grid of tetration attractors,
//! all read through a layered clock of rings 12/60/60/100.
//!
//! The search is a heuristic. It is deterministic and always terminates,
//! but it makes no claim of inverting scalar multiplication on
//! cryptographic curves.
//!
//! # Architecture
//!
//! The codebase follows a strict layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - Nearest anchors, quadrant priors, the three-layer search,
//!   verification and confidence
//! - [`anchors`] - Solid vertices, shared vertices, attractors, GCD constants
//! - [`embed`] - Scalar/point embeddings and the clock projector
//! - [`curve`] - The only interface to elliptic-curve arithmetic
//! - [`core`] - Scalars, lattice points, strong types, configuration
//! - [`ui`] - Output formatting
//!
//! # Correctness Invariants
//!
//! 1. The anchor set is immutable once built and shared without locks
//! 2. Every recovered scalar lies in `[0, n)`
//! 3. Confidence lies in `[0, 1]`; `verified` is never a false positive
//! 4. Identical inputs produce byte-identical results
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use clocklattice::{build_anchor_set, open_curve, recover};
//! use clocklattice::core::config::AnchorConfig;
//!
//! let anchors = Arc::new(build_anchor_set(&AnchorConfig::default())?);
//! let curve = open_curve("secp256k1")?;
//! let q = curve.generator();
//! let result = recover(&anchors, &curve, &q, None)?;
//! assert!(result.verified);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod anchors;
pub mod cli;
pub mod core;
pub mod curve;
pub mod embed;
pub mod engine;
pub mod ui;

pub use anchors::AnchorSet;
pub use crate::core::config::{AnchorConfig, EngineConfig, SearchConfig};
pub use crate::core::scalar::BigScalar;
pub use curve::{open_curve, CurveAdapter, CurvePoint};
pub use engine::{build_anchor_set, recover, Engine, EngineError, RecoveryResult};
