//! core::lattice
//!
//! Points in the 13-dimensional lattice space and the π·φ metric.
//!
//! # Constants
//!
//! - [`DIM`] - Dimension of the lattice space
//! - [`PHI`] - The golden ratio
//! - [`SIGMA`] - The π·φ scale applied to every distance
//! - [`FREQUENCIES`] - The 13 dimensional frequencies (small odd primes)
//!
//! # Invariants
//!
//! A [`LatticePoint`] built through this module never holds NaN. Components
//! produced by the embeddings lie in `[-1, 1]`.

use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Dimension of the lattice space.
pub const DIM: usize = 13;

/// The golden ratio `(1 + √5) / 2`.
pub const PHI: f64 = 1.618_033_988_749_895;

/// The π·φ scaling constant.
pub const SIGMA: f64 = PI * PHI;

/// Dimensional frequencies ψ₁..ψ₁₃.
pub const FREQUENCIES: [u32; DIM] = [3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43];

/// A point in the lattice space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatticePoint([f64; DIM]);

impl LatticePoint {
    /// The all-zero point.
    pub const ORIGIN: LatticePoint = LatticePoint([0.0; DIM]);

    /// Wrap raw components. Non-finite components are replaced with zero.
    pub fn new(components: [f64; DIM]) -> Self {
        let mut clean = components;
        for c in clean.iter_mut() {
            if !c.is_finite() {
                *c = 0.0;
            }
        }
        Self(clean)
    }

    /// Zero-pad a 3-D vector into the lattice space.
    pub fn from_3d(v: [f64; 3]) -> Self {
        let mut components = [0.0; DIM];
        components[..3].copy_from_slice(&v);
        Self::new(components)
    }

    /// Component slice.
    pub fn components(&self) -> &[f64; DIM] {
        &self.0
    }

    /// Mutable access for in-place rotations.
    pub(crate) fn components_mut(&mut self) -> &mut [f64; DIM] {
        &mut self.0
    }

    /// Inner product.
    pub fn dot(&self, other: &LatticePoint) -> f64 {
        self.0.iter().zip(other.0.iter()).map(|(a, b)| a * b).sum()
    }

    /// Euclidean norm.
    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Unscaled Euclidean distance.
    pub fn euclidean(&self, other: &LatticePoint) -> f64 {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f64>()
            .sqrt()
    }

    /// The π·φ metric: Euclidean distance scaled by σ.
    pub fn distance(&self, other: &LatticePoint) -> f64 {
        SIGMA * self.euclidean(other)
    }

    /// Project onto the unit sphere. The origin stays at the origin.
    pub fn normalized(&self) -> LatticePoint {
        let n = self.norm();
        if n <= f64::EPSILON {
            return LatticePoint::ORIGIN;
        }
        let mut out = self.0;
        for c in out.iter_mut() {
            *c /= n;
        }
        Self(out)
    }

    /// Arithmetic mean of a non-empty set of points.
    pub fn centroid<'a>(points: impl IntoIterator<Item = &'a LatticePoint>) -> LatticePoint {
        let mut sum = [0.0; DIM];
        let mut count = 0usize;
        for p in points {
            for (s, c) in sum.iter_mut().zip(p.0.iter()) {
                *s += c;
            }
            count += 1;
        }
        if count == 0 {
            return LatticePoint::ORIGIN;
        }
        for s in sum.iter_mut() {
            *s /= count as f64;
        }
        Self(sum)
    }

    /// `self + scale * other`.
    pub fn add_scaled(&self, other: &LatticePoint, scale: f64) -> LatticePoint {
        let mut out = self.0;
        for (o, c) in out.iter_mut().zip(other.0.iter()) {
            *o += scale * c;
        }
        Self::new(out)
    }

    /// True if every component is finite.
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|c| c.is_finite())
    }
}

impl Default for LatticePoint {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for LatticePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, c) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{c:.4}")?;
        }
        write!(f, "]")
    }
}

/// Wrap an angle into `[0, 2π)`.
pub fn wrap_angle(theta: f64) -> f64 {
    let wrapped = theta.rem_euclid(2.0 * PI);
    // rem_euclid can round up to exactly 2π for tiny negative inputs.
    if wrapped >= 2.0 * PI {
        0.0
    } else {
        wrapped
    }
}

/// Signed shortest-arc difference `a - b`, in `(-π, π]`.
pub fn signed_arc(a: f64, b: f64) -> f64 {
    let d = wrap_angle(a - b);
    if d > PI {
        d - 2.0 * PI
    } else {
        d
    }
}
