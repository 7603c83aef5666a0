//! anchors::attractors
//!
//! Tetration-derived attractor points.
//!
//! An attractor is indexed by a prime base `b` and a tower depth `d`. Its
//! magnitude is carried in log space (`d·ln b`) since the towers themselves
//! are astronomically large. The position uses the same modulation as the
//! scalar embedding, so a scalar's embedding can be compared with the
//! attractor grid directly.

use std::f64::consts::PI;

use serde::Serialize;

use crate::core::lattice::{LatticePoint, DIM};

/// One (base, depth) attractor.
#[derive(Debug, Clone, Serialize)]
pub struct AttractorPoint {
    /// Prime base of the tower.
    pub base: u32,
    /// Tower depth.
    pub depth: u32,
    /// `depth · ln(base)`.
    pub log_magnitude: f64,
    /// `0.5 + 0.3·sin(2π·(b·d + i) / 13)` per component.
    pub position: LatticePoint,
    /// `1 + (depth - min_depth) / 10`; always positive.
    pub strength: f64,
}

/// Build the attractor grid, base-major.
pub fn build_attractors(bases: &[u32], depth_range: [u32; 2]) -> Vec<AttractorPoint> {
    let [lo, hi] = depth_range;
    bases
        .iter()
        .flat_map(|base| (lo..=hi).map(move |depth| attractor(*base, depth, lo)))
        .collect()
}

fn attractor(base: u32, depth: u32, min_depth: u32) -> AttractorPoint {
    let phase = f64::from(base) * f64::from(depth);
    let position = std::array::from_fn(|i| {
        0.5 + 0.3 * (2.0 * PI * (phase + i as f64) / DIM as f64).sin()
    });
    AttractorPoint {
        base,
        depth,
        log_magnitude: f64::from(depth) * f64::from(base).ln(),
        position: LatticePoint::new(position),
        strength: 1.0 + f64::from(depth - min_depth) / 10.0,
    }
}

/// The attractor with the smallest strength-weighted distance to `p`.
///
/// Returns the attractor index and its weighted distance. Ties keep the
/// earlier attractor.
pub fn nearest_attractor(attractors: &[AttractorPoint], p: &LatticePoint) -> Option<(usize, f64)> {
    attractors
        .iter()
        .enumerate()
        .map(|(i, a)| (i, a.position.distance(p) / a.strength))
        .fold(None, |best, (i, d)| match best {
            Some((_, bd)) if bd <= d => best,
            _ => Some((i, d)),
        })
}
