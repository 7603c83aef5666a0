//! curve::traits
//!
//! CurveAdapter trait definition for elliptic-curve backends.
//!
//! # Design
//!
//! The engine never touches curve arithmetic directly. Everything it needs
//! from a curve (the group order, scalar multiplication of the generator,
//! point addition, affine coordinates, and equality) goes through
//! [`CurveAdapter`]. Adapters are `Send + Sync` so one adapter can serve
//! every request in a batch.
//!
//! Points are carried as [`CurvePoint`], an opaque value owned by the
//! adapter that produced it. Handing a point from one adapter to another
//! yields `CurveError::Adapter`.
//!
//! # Example
//!
//! ```
//! use clocklattice::core::scalar::BigScalar;
//! use clocklattice::curve::open_curve;
//!
//! let curve = open_curve("secp256k1").unwrap();
//! let g = curve.generator();
//! let q = curve.point_mul(&BigScalar::from_u64(1)).unwrap();
//! assert!(curve.equal(&g, &q));
//! ```

use thiserror::Error;

use crate::core::scalar::BigScalar;

use super::mock::ToyPoint;

/// Errors from curve operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CurveError {
    /// The curve name is not on the allow-list.
    #[error("unknown curve '{name}' (known curves: {known})")]
    UnknownCurve { name: String, known: String },

    /// The backend rejected an operation.
    #[error("curve backend error: {0}")]
    Adapter(String),
}

/// An opaque point, tagged with the backend that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePoint(pub(crate) PointRepr);

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum PointRepr {
    Secp256k1(k256::ProjectivePoint),
    P256(p256::ProjectivePoint),
    Toy(ToyPoint),
}

impl CurvePoint {
    /// Backend tag, for error messages.
    pub(crate) fn backend(&self) -> &'static str {
        match self.0 {
            PointRepr::Secp256k1(_) => "secp256k1",
            PointRepr::P256(_) => "prime256v1",
            PointRepr::Toy(_) => "toy",
        }
    }
}

/// Affine view of a point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Affine {
    /// Big-endian coordinates, each exactly `coordinate_len` bytes.
    Point { x: Vec<u8>, y: Vec<u8> },
    /// The point at infinity.
    AtInfinity,
}

/// A named short-Weierstrass curve.
pub trait CurveAdapter: Send + Sync + std::fmt::Debug {
    /// Canonical curve name.
    fn name(&self) -> &str;

    /// Big-endian bytes of the group order n.
    fn order(&self) -> Vec<u8>;

    /// Bytes per affine coordinate.
    fn coordinate_len(&self) -> usize;

    /// The base point G.
    fn generator(&self) -> CurvePoint;

    /// `k·G`. Scalars at or above n are reduced first, so `k ≡ 0 (mod n)`
    /// yields the identity.
    fn point_mul(&self, k: &BigScalar) -> Result<CurvePoint, CurveError>;

    /// `a + b`.
    fn add(&self, a: &CurvePoint, b: &CurvePoint) -> Result<CurvePoint, CurveError>;

    /// Affine coordinates of a point.
    fn affine(&self, p: &CurvePoint) -> Result<Affine, CurveError>;

    /// Group equality. Points from another backend are never equal.
    fn equal(&self, p: &CurvePoint, q: &CurvePoint) -> bool;

    /// Decode a SEC1 encoding (compressed or uncompressed).
    fn decode_point(&self, bytes: &[u8]) -> Result<CurvePoint, CurveError>;

    /// SEC1 uncompressed encoding (`0x00` for the identity).
    fn encode_point(&self, p: &CurvePoint) -> Result<Vec<u8>, CurveError>;
}

/// Error for a point handed to the wrong adapter.
pub(crate) fn foreign_point(adapter: &str, p: &CurvePoint) -> CurveError {
    CurveError::Adapter(format!(
        "point from backend '{}' passed to '{}'",
        p.backend(),
        adapter
    ))
}
