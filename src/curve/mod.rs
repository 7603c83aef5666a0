//! curve
//!
//! Elliptic-curve adapters.
//!
//! # Architecture
//!
//! The engine talks to curves only through [`CurveAdapter`]. Concrete
//! backends live here and nowhere else:
//!
//! - [`Secp256k1Curve`] - secp256k1 via `k256`
//! - [`P256Curve`] - NIST P-256 via `p256`
//! - [`ToyCurve`] - small prime-order curves for deterministic tests
//!
//! Use [`open_curve`] to obtain an adapter by name.

pub mod factory;
pub mod mock;
mod rustcrypto;
pub mod traits;

pub use factory::{open_curve, valid_curve_names, CurveName};
pub use mock::ToyCurve;
pub use rustcrypto::{P256Curve, Secp256k1Curve};
pub use traits::{Affine, CurveAdapter, CurveError, CurvePoint};
