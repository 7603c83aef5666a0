//! engine::nearest
//!
//! The three shared vertices nearest to a query point.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::anchors::{AnchorSet, SharedVertex};
use crate::core::lattice::LatticePoint;

/// Tolerance of the approximate Pythagorean-triple predicate.
pub const TRIPLE_EPSILON: f64 = 0.05;

/// Three nearest shared vertices, closest first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NearestTriple {
    /// Shared-vertex ids.
    pub vertices: [usize; 3],
    /// π·φ distances, non-decreasing.
    pub distances: [f64; 3],
    /// `|d₁² + d₂² − d₃²| / d₃² < ε`.
    pub triple_ok: bool,
}

/// Rank `a` before `b`: smaller distance, then higher stability, then fewer
/// contributing solids, then lower id.
fn rank(a: (&SharedVertex, f64), b: (&SharedVertex, f64)) -> Ordering {
    a.1.total_cmp(&b.1)
        .then_with(|| b.0.stability.total_cmp(&a.0.stability))
        .then_with(|| {
            a.0.contributing_solids
                .len()
                .cmp(&b.0.contributing_solids.len())
        })
        .then_with(|| a.0.id.cmp(&b.0.id))
}

/// Find the three nearest shared vertices to `query`.
///
/// Returns `None` if the set has fewer than three shared vertices.
pub fn nearest_three(anchors: &AnchorSet, query: &LatticePoint) -> Option<NearestTriple> {
    let mut best: Vec<(&SharedVertex, f64)> = Vec::with_capacity(4);
    for vertex in anchors.shared_vertices() {
        let candidate = (vertex, vertex.position.distance(query));
        let at = best
            .iter()
            .position(|held| rank(candidate, *held) == Ordering::Less)
            .unwrap_or(best.len());
        if at < 3 {
            best.insert(at, candidate);
            best.truncate(3);
        }
    }

    if best.len() < 3 {
        return None;
    }
    let vertices = [best[0].0.id, best[1].0.id, best[2].0.id];
    let distances = [best[0].1, best[1].1, best[2].1];
    Some(NearestTriple {
        vertices,
        distances,
        triple_ok: triple_predicate(distances),
    })
}

/// The approximate Pythagorean-triple check on sorted distances.
pub fn triple_predicate(d: [f64; 3]) -> bool {
    let hyp = d[2] * d[2];
    if hyp <= f64::EPSILON {
        return false;
    }
    ((d[0] * d[0] + d[1] * d[1] - hyp).abs() / hyp) < TRIPLE_EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::AnchorConfig;

    fn anchors() -> AnchorSet {
        AnchorSet::build(&AnchorConfig::default()).unwrap()
    }

    #[test]
    fn distances_are_sorted() {
        let set = anchors();
        for v in set.shared_vertices().iter().step_by(7) {
            let query = v.position.add_scaled(&set.anchors()[0].position, 0.3);
            let triple = nearest_three(&set, &query).unwrap();
            assert!(triple.distances[0] <= triple.distances[1]);
            assert!(triple.distances[1] <= triple.distances[2]);
        }
    }

    #[test]
    fn exact_vertex_comes_first() {
        let set = anchors();
        let target = &set.shared_vertices()[17];
        let triple = nearest_three(&set, &target.position).unwrap();
        assert_eq!(triple.vertices[0], 17);
        assert_eq!(triple.distances[0], 0.0);
    }

    #[test]
    fn matches_brute_force() {
        let set = anchors();
        let query = set.anchors()[30].position;
        let mut all: Vec<f64> = set
            .shared_vertices()
            .iter()
            .map(|v| v.position.distance(&query))
            .collect();
        all.sort_by(f64::total_cmp);
        let triple = nearest_three(&set, &query).unwrap();
        assert_eq!(triple.distances, [all[0], all[1], all[2]]);
    }

    #[test]
    fn pythagorean_predicate() {
        assert!(triple_predicate([3.0, 4.0, 5.0]));
        assert!(triple_predicate([3.0, 4.0, 5.1]));
        assert!(!triple_predicate([1.0, 1.0, 1.0]));
        assert!(!triple_predicate([0.0, 0.0, 0.0]));
    }
}
