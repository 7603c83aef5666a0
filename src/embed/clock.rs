//! embed::clock
//!
//! Projection of lattice points onto the four clock rings.
//!
//! # Planes
//!
//! Each ring `r` owns a fixed plane spanned by the orthonormal pair
//! `(u_r, v_r)`. The eight basis vectors come from Gram-Schmidt over the
//! seeds `cos(φ·(i+1)·(j+1) + ψᵢ)`, so the four planes are mutually
//! orthogonal.
//!
//! # Reading
//!
//! `θ_r = atan2(p·v_r, p·u_r)` wrapped into `[0, 2π)`; ring 0 additionally
//! adds the phase offset. The clock position is
//! `⌊θ_r·N_r / 2π + 0.5⌋ mod N_r`.
//!
//! # Lifting
//!
//! [`ClockProjector::lift`] maps clock positions back to a unit lattice
//! point whose reading returns the same positions.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::core::lattice::{wrap_angle, LatticePoint, DIM, FREQUENCIES, PHI};

/// Number of clock rings.
pub const RINGS: usize = 4;

/// Angles and positions of one lattice point on every ring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClockReading {
    /// Ring angles in `[0, 2π)`, phase offset included on ring 0.
    pub angles: [f64; RINGS],
    /// Quantized positions, `positions[r] < N_r`.
    pub positions: [u32; RINGS],
}

/// Fixed ring planes plus ring sizes and the ring-0 phase offset.
#[derive(Debug, Clone)]
pub struct ClockProjector {
    planes: [(LatticePoint, LatticePoint); RINGS],
    ring_sizes: [u32; RINGS],
    phase: f64,
}

impl ClockProjector {
    /// Build the projector.
    pub fn new(ring_sizes: [u32; RINGS], phase_offset_degrees: f64) -> Self {
        let basis = ring_basis();
        let planes = std::array::from_fn(|r| (basis[2 * r], basis[2 * r + 1]));
        Self {
            planes,
            ring_sizes,
            phase: wrap_angle(phase_offset_degrees.to_radians()),
        }
    }

    /// Ring sizes, innermost first.
    pub fn ring_sizes(&self) -> [u32; RINGS] {
        self.ring_sizes
    }

    /// Phase offset on ring 0, in radians.
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Angle of `p` on `ring`, in `[0, 2π)`.
    pub fn angle(&self, p: &LatticePoint, ring: usize) -> f64 {
        let (u, v) = &self.planes[ring];
        let theta = wrap_angle(p.dot(v).atan2(p.dot(u)));
        if ring == 0 {
            wrap_angle(theta + self.phase)
        } else {
            theta
        }
    }

    /// Clock position of an angle on `ring`.
    pub fn quantize(&self, ring: usize, theta: f64) -> u32 {
        let n = self.ring_sizes[ring];
        let steps = (theta * f64::from(n) / (2.0 * PI) + 0.5).floor();
        (steps.rem_euclid(f64::from(n)) as u32) % n
    }

    /// Angle of grid point `position` on `ring`.
    pub fn grid_angle(&self, ring: usize, position: u32) -> f64 {
        let n = self.ring_sizes[ring];
        2.0 * PI * f64::from(position % n) / f64::from(n)
    }

    /// Angular distance from `theta` to the nearest grid point of `ring`.
    pub fn grid_offset(&self, ring: usize, theta: f64) -> f64 {
        let step = 2.0 * PI / f64::from(self.ring_sizes[ring]);
        (theta - (theta / step).round() * step).abs()
    }

    /// Read all four rings.
    pub fn reading(&self, p: &LatticePoint) -> ClockReading {
        let angles: [f64; RINGS] = std::array::from_fn(|r| self.angle(p, r));
        let positions = std::array::from_fn(|r| self.quantize(r, angles[r]));
        ClockReading { angles, positions }
    }

    /// Smallest ring whose grid passes within the finest half-step of
    /// `reading`'s angle, or the outermost ring.
    pub fn assign_ring(&self, reading: &ClockReading) -> usize {
        // Ring 0's own half-step is 15°, which every angle satisfies, so a
        // per-ring tolerance would assign every vertex to ring 0. The
        // finest half-step keeps the assignment discriminating.
        let tolerance = PI / f64::from(self.ring_sizes[RINGS - 1]);
        (0..RINGS)
            .find(|r| self.grid_offset(*r, reading.angles[*r]) <= tolerance)
            .unwrap_or(RINGS - 1)
    }

    /// A unit lattice point whose reading has the given positions.
    pub fn lift(&self, positions: [u32; RINGS]) -> LatticePoint {
        let mut p = LatticePoint::ORIGIN;
        for (r, (u, v)) in self.planes.iter().enumerate() {
            let mut theta = self.grid_angle(r, positions[r]);
            if r == 0 {
                theta -= self.phase;
            }
            p = p
                .add_scaled(u, theta.cos() / 2.0)
                .add_scaled(v, theta.sin() / 2.0);
        }
        p
    }
}

/// Orthonormal basis of the eight ring-plane vectors.
fn ring_basis() -> [LatticePoint; 2 * RINGS] {
    let mut basis = [LatticePoint::ORIGIN; 2 * RINGS];
    for j in 0..2 * RINGS {
        let seed: [f64; DIM] = std::array::from_fn(|i| {
            (PHI * (i + 1) as f64 * (j + 1) as f64 + f64::from(FREQUENCIES[i])).cos()
        });
        let mut v = LatticePoint::new(seed);
        for b in basis.iter().take(j) {
            let d = v.dot(b);
            v = v.add_scaled(b, -d);
        }
        basis[j] = v.normalized();
    }
    basis
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projector() -> ClockProjector {
        ClockProjector::new([12, 60, 60, 100], 42.0)
    }

    #[test]
    fn basis_is_orthonormal() {
        let basis = ring_basis();
        for (i, a) in basis.iter().enumerate() {
            for (j, b) in basis.iter().enumerate() {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((a.dot(b) - expected).abs() < 1e-9, "({i}, {j})");
            }
        }
    }

    #[test]
    fn positions_stay_on_ring() {
        let clock = projector();
        for r in 0..RINGS {
            let n = clock.ring_sizes()[r];
            assert_eq!(clock.quantize(r, 0.0), 0);
            assert_eq!(clock.quantize(r, 2.0 * PI - 1e-12), 0);
            assert!(clock.quantize(r, 3.0) < n);
        }
    }

    #[test]
    fn lift_then_read_is_identity() {
        let clock = projector();
        for positions in [[0, 0, 0, 0], [11, 59, 59, 99], [5, 17, 42, 63], [3, 30, 1, 50]] {
            let lifted = clock.lift(positions);
            assert!((lifted.norm() - 1.0).abs() < 1e-9);
            assert_eq!(clock.reading(&lifted).positions, positions);
        }
    }

    #[test]
    fn phase_offset_shifts_ring_zero_only() {
        let plain = ClockProjector::new([12, 60, 60, 100], 0.0);
        let shifted = projector();
        let p = plain.lift([0, 7, 8, 9]);
        let a = plain.reading(&p);
        let b = shifted.reading(&p);
        assert!((wrap_angle(b.angles[0] - a.angles[0]) - 42f64.to_radians()).abs() < 1e-9);
        assert_eq!(a.angles[1..], b.angles[1..]);
    }

    #[test]
    fn origin_reads_without_nan() {
        let reading = projector().reading(&LatticePoint::ORIGIN);
        assert!(reading.angles.iter().all(|a| a.is_finite()));
    }

    #[test]
    fn grid_points_take_ring_zero() {
        let clock = projector();
        let reading = clock.reading(&clock.lift([4, 0, 0, 0]));
        assert_eq!(clock.assign_ring(&reading), 0);
    }

    #[test]
    fn ring_zero_needs_the_finest_tolerance() {
        let clock = projector();
        // 10° off a ring-0 tick is inside ring 0's own half-step but
        // outside the 1.8° half-step of the 100-position ring.
        let reading = ClockReading {
            angles: [10f64.to_radians(), 0.0, 0.5, 0.5],
            positions: [0, 0, 5, 8],
        };
        assert_eq!(clock.assign_ring(&reading), 1);

        let off_grid = ClockReading {
            angles: [10f64.to_radians(), 0.05, 0.05, 0.0],
            positions: [0, 0, 0, 0],
        };
        assert_eq!(clock.assign_ring(&off_grid), RINGS - 1);
    }
}
