//! engine::quadrant
//!
//! Quadrant priors over the scalar range.
//!
//! The ring-0 angle of the query selects one of four quadrants, and each
//! quadrant owns a quarter of `[0, n)` as its prior search window. Q1 and Q2
//! have positive polarity, Q3 and Q4 negative. The mirror of a quadrant is
//! the diagonally opposite one (Q1↔Q3, Q2↔Q4).

use std::f64::consts::FRAC_PI_2;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::lattice::wrap_angle;
use crate::core::scalar::{BigScalar, GroupOrder};

/// One of the four 90° arcs of ring 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuadrantId {
    Q1,
    Q2,
    Q3,
    Q4,
}

/// Upper or lower half of the circle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Positive,
    Negative,
}

impl QuadrantId {
    /// All quadrants in order.
    pub const ALL: [QuadrantId; 4] = [QuadrantId::Q1, QuadrantId::Q2, QuadrantId::Q3, QuadrantId::Q4];

    /// Quadrant of an angle (wrapped into `[0, 2π)` first).
    pub fn from_angle(theta: f64) -> QuadrantId {
        let index = (wrap_angle(theta) / FRAC_PI_2).floor() as usize;
        QuadrantId::ALL[index.min(3)]
    }

    /// Zero-based index.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Q1/Q2 are positive, Q3/Q4 negative.
    pub fn polarity(self) -> Polarity {
        match self {
            QuadrantId::Q1 | QuadrantId::Q2 => Polarity::Positive,
            QuadrantId::Q3 | QuadrantId::Q4 => Polarity::Negative,
        }
    }

    /// The diagonally opposite quadrant.
    pub fn mirror(self) -> QuadrantId {
        QuadrantId::ALL[(self.index() + 2) % 4]
    }
}

impl fmt::Display for QuadrantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}", self.index() + 1)
    }
}

/// A half-open scalar window `[lo, hi)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    pub lo: BigScalar,
    pub hi: BigScalar,
}

impl Window {
    /// True if `lo <= k < hi`.
    pub fn contains(&self, k: &BigScalar) -> bool {
        *k >= self.lo && *k < self.hi
    }

    /// Clamp `k` into the window. An empty window clamps to `lo`.
    pub fn clamp(&self, k: BigScalar) -> BigScalar {
        if k < self.lo || self.hi <= self.lo {
            self.lo.clone()
        } else if k >= self.hi {
            self.hi.predecessor()
        } else {
            k
        }
    }

    /// Bit length of the window size.
    pub fn size_bits(&self) -> u64 {
        self.lo.distance_to(&self.hi).bits()
    }
}

/// Prior window of `quadrant`: `[⌊n·q/4⌋, ⌊n·(q+1)/4⌋)`.
pub fn prior_window(quadrant: QuadrantId, order: &GroupOrder) -> Window {
    let q = quadrant.index() as u32;
    Window {
        lo: order.portion(q, 4),
        hi: order.portion(q + 1, 4),
    }
}
