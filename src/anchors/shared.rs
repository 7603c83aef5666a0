//! anchors::shared
//!
//! Discovery of shared vertices.
//!
//! # Algorithm
//!
//! 1. Every pair of anchors from different solids whose π·φ distance is at
//!    most τ is a candidate.
//! 2. Candidates whose pair midpoints coincide (within [`MERGE_EPSILON`])
//!    belong to the same equivalence class. This folds, for example, the
//!    tetrahedron/cube, tetrahedron/dodecahedron and cube/dodecahedron
//!    pairs at one point into a single vertex.
//! 3. Each class yields one [`SharedVertex`] at the centroid of its member
//!    anchors.
//!
//! Classes are emitted in order of their first candidate, so vertex ids are
//! stable for a given configuration.

use serde::Serialize;

use super::solids::Anchor;
use crate::core::lattice::{LatticePoint, SIGMA};
use crate::core::types::{Solid, SolidSet};
use crate::embed::ClockProjector;

/// Midpoints closer than this are the same shared vertex.
pub const MERGE_EPSILON: f64 = 1e-9;

/// Number of quadrant hints per vertex.
pub const QUADRANTS: usize = 4;

/// The centroid of a class of coinciding cross-solid anchor pairs.
#[derive(Debug, Clone, Serialize)]
pub struct SharedVertex {
    /// Index in the anchor set.
    pub id: usize,
    /// Centroid of the member anchors.
    pub position: LatticePoint,
    /// Union of the members' solids; always at least two.
    pub contributing_solids: SolidSet,
    /// Indices of the member anchors, ascending.
    pub members: Vec<usize>,
    /// Mean pairwise π·φ distance between members.
    pub mean_distance: f64,
    /// `|solids| / 5 · exp(-mean_distance / σ)`.
    pub stability: f64,
    /// Coarsest ring whose grid the vertex sits on.
    pub ring: u8,
    /// Clock position on `ring`.
    pub ring_position: u32,
    /// Fractions of the scalar range, one per quadrant.
    pub quadrant_hints: [f64; QUADRANTS],
}

/// Union-find over candidate indices.
struct DisjointSets {
    parent: Vec<usize>,
}

impl DisjointSets {
    fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra != rb {
            // Keep the smaller index as root so class order is stable.
            let (lo, hi) = if ra < rb { (ra, rb) } else { (rb, ra) };
            self.parent[hi] = lo;
        }
    }
}

struct Candidate {
    pair: (usize, usize),
    midpoint: LatticePoint,
}

/// Find all shared vertices among `anchors` at tolerance `tau`.
pub fn find_shared_vertices(
    anchors: &[Anchor],
    tau: f64,
    clock: &ClockProjector,
) -> Vec<SharedVertex> {
    let mut candidates = Vec::new();
    for (i, a) in anchors.iter().enumerate() {
        for (j, b) in anchors.iter().enumerate().skip(i + 1) {
            if a.solid != b.solid && a.position.distance(&b.position) <= tau {
                candidates.push(Candidate {
                    pair: (i, j),
                    midpoint: LatticePoint::centroid([&a.position, &b.position]),
                });
            }
        }
    }

    let mut sets = DisjointSets::new(candidates.len());
    for x in 0..candidates.len() {
        for y in x + 1..candidates.len() {
            if candidates[x].midpoint.euclidean(&candidates[y].midpoint) <= MERGE_EPSILON {
                sets.union(x, y);
            }
        }
    }

    let mut classes: Vec<(usize, Vec<usize>)> = Vec::new();
    for x in 0..candidates.len() {
        let root = sets.find(x);
        match classes.iter_mut().find(|(r, _)| *r == root) {
            Some((_, members)) => members.push(x),
            None => classes.push((root, vec![x])),
        }
    }

    classes
        .into_iter()
        .enumerate()
        .map(|(id, (_, class))| {
            let mut members: Vec<usize> = class
                .iter()
                .flat_map(|c| [candidates[*c].pair.0, candidates[*c].pair.1])
                .collect();
            members.sort_unstable();
            members.dedup();
            build_vertex(id, members, anchors, clock)
        })
        .collect()
}

fn build_vertex(
    id: usize,
    members: Vec<usize>,
    anchors: &[Anchor],
    clock: &ClockProjector,
) -> SharedVertex {
    let position = LatticePoint::centroid(members.iter().map(|m| &anchors[*m].position));
    let contributing_solids: SolidSet = members.iter().map(|m| anchors[*m].solid).collect();

    let mut total = 0.0;
    let mut pairs = 0usize;
    for (i, a) in members.iter().enumerate() {
        for b in &members[i + 1..] {
            total += anchors[*a].position.distance(&anchors[*b].position);
            pairs += 1;
        }
    }
    let mean_distance = if pairs == 0 { 0.0 } else { total / pairs as f64 };
    let stability = contributing_solids.len() as f64 / Solid::ALL.len() as f64
        * (-mean_distance / SIGMA).exp();

    let reading = clock.reading(&position);
    let ring = clock.assign_ring(&reading);
    let ring_position = reading.positions[ring];

    SharedVertex {
        id,
        position,
        contributing_solids,
        members,
        mean_distance,
        stability: stability.clamp(0.0, 1.0),
        ring: ring as u8,
        ring_position,
        quadrant_hints: quadrant_hints(ring_position, clock.ring_sizes()[ring]),
    }
}

/// `(q + position / N) / 4` for each quadrant `q`.
fn quadrant_hints(ring_position: u32, ring_size: u32) -> [f64; QUADRANTS] {
    let within = f64::from(ring_position) / f64::from(ring_size);
    std::array::from_fn(|q| (q as f64 + within) / QUADRANTS as f64)
}

#[cfg(test)]
mod tests {
    use super::super::solids::build_anchors;
    use super::*;

    fn clock() -> ClockProjector {
        ClockProjector::new([12, 60, 60, 100], 42.0)
    }

    #[test]
    fn zero_tolerance_finds_exact_coincidences() {
        let vertices = find_shared_vertices(&build_anchors(), 0.0, &clock());
        // Four tetrahedron vertices shared with cube and dodecahedron, plus
        // the other four cube vertices shared with the dodecahedron.
        assert_eq!(vertices.len(), 8);
        let triples = vertices
            .iter()
            .filter(|v| v.contributing_solids.len() == 3)
            .count();
        assert_eq!(triples, 4);
        for v in &vertices {
            assert_eq!(v.mean_distance, 0.0);
            assert!(v.contributing_solids.contains(Solid::Cube));
            assert!(v.contributing_solids.contains(Solid::Dodecahedron));
        }
    }

    #[test]
    fn default_tolerance_finds_140() {
        let vertices = find_shared_vertices(&build_anchors(), 5.0, &clock());
        assert_eq!(vertices.len(), 140);
    }

    #[test]
    fn vertices_are_well_formed() {
        let anchors = build_anchors();
        for v in find_shared_vertices(&anchors, 5.0, &clock()) {
            assert!(v.position.is_finite());
            assert!(v.contributing_solids.len() >= 2);
            assert!(v.members.len() >= 2);
            assert!((0.0..=1.0).contains(&v.stability));
            assert!(v.ring < 4);
            assert!(v.ring_position < clock().ring_sizes()[usize::from(v.ring)]);
            for (q, hint) in v.quadrant_hints.iter().enumerate() {
                assert!(*hint >= q as f64 / 4.0 && *hint < (q + 1) as f64 / 4.0);
            }
        }
    }

    #[test]
    fn ids_are_sequential() {
        let vertices = find_shared_vertices(&build_anchors(), 3.5, &clock());
        for (i, v) in vertices.iter().enumerate() {
            assert_eq!(v.id, i);
        }
    }

    #[test]
    fn union_find_merges_transitively() {
        let mut sets = DisjointSets::new(4);
        sets.union(3, 2);
        sets.union(2, 1);
        assert_eq!(sets.find(3), 1);
        assert_eq!(sets.find(0), 0);
    }
}
