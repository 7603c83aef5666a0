//! anchors::solids
//!
//! Platonic-solid vertices embedded in the lattice space.
//!
//! Every solid is scaled to unit circumradius, zero-padded from 3-D to 13-D
//! and then turned into a shared frame by three sweeps of Givens rotations
//! over adjacent coordinate planes `(i, i+1)` with angle `π·(s+1)/ψᵢ`.
//! The rotation is an isometry, so coincident 3-D vertices of different
//! solids stay coincident.

use std::f64::consts::PI;

use serde::Serialize;

use crate::core::lattice::{LatticePoint, DIM, FREQUENCIES, PHI};
use crate::core::types::Solid;

/// Rotation sweeps applied to every padded vertex.
const SWEEPS: usize = 3;

/// One vertex of one Platonic solid.
#[derive(Debug, Clone, Serialize)]
pub struct Anchor {
    /// Position in the shared frame.
    pub position: LatticePoint,
    /// The solid this vertex belongs to.
    pub solid: Solid,
    /// Index of the vertex within its solid.
    pub vertex_index: usize,
    /// Fraction of the other four solids with a vertex within τ.
    pub stability: f64,
}

/// Canonical 3-D vertices of a solid, before scaling.
pub fn canonical_vertices(solid: Solid) -> Vec<[f64; 3]> {
    let signs = [1.0, -1.0];
    let cube = || {
        let mut out = Vec::with_capacity(8);
        for x in signs {
            for y in signs {
                for z in signs {
                    out.push([x, y, z]);
                }
            }
        }
        out
    };
    let golden_rectangles = |a: f64, b: f64| {
        let mut out = Vec::with_capacity(12);
        for s in signs {
            for t in signs {
                out.push([0.0, s * a, t * b]);
            }
        }
        for s in signs {
            for t in signs {
                out.push([s * a, t * b, 0.0]);
            }
        }
        for s in signs {
            for t in signs {
                out.push([s * b, 0.0, t * a]);
            }
        }
        out
    };

    match solid {
        Solid::Tetrahedron => vec![
            [1.0, 1.0, 1.0],
            [1.0, -1.0, -1.0],
            [-1.0, 1.0, -1.0],
            [-1.0, -1.0, 1.0],
        ],
        Solid::Cube => cube(),
        Solid::Octahedron => vec![
            [1.0, 0.0, 0.0],
            [-1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, -1.0, 0.0],
            [0.0, 0.0, 1.0],
            [0.0, 0.0, -1.0],
        ],
        Solid::Dodecahedron => {
            let mut out = cube();
            out.extend(golden_rectangles(1.0 / PHI, PHI));
            out
        }
        Solid::Icosahedron => golden_rectangles(1.0, PHI),
    }
}

fn unit(v: [f64; 3]) -> [f64; 3] {
    let n = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    [v[0] / n, v[1] / n, v[2] / n]
}

/// Rotate a padded vector into the shared frame.
pub fn rotate_into_frame(p: &LatticePoint) -> LatticePoint {
    let mut out = *p;
    let c = out.components_mut();
    for sweep in 0..SWEEPS {
        for i in 0..DIM - 1 {
            let theta = PI * (sweep + 1) as f64 / f64::from(FREQUENCIES[i]);
            let (s, co) = theta.sin_cos();
            let (a, b) = (c[i], c[i + 1]);
            c[i] = a * co - b * s;
            c[i + 1] = a * s + b * co;
        }
    }
    out
}

/// All 50 anchors, solid by solid, with stability still unset.
pub fn build_anchors() -> Vec<Anchor> {
    Solid::ALL
        .iter()
        .flat_map(|solid| {
            canonical_vertices(*solid)
                .into_iter()
                .enumerate()
                .map(move |(vertex_index, v)| Anchor {
                    position: rotate_into_frame(&LatticePoint::from_3d(unit(v))),
                    solid: *solid,
                    vertex_index,
                    stability: 0.0,
                })
        })
        .collect()
}

/// Set each anchor's stability to the fraction of other solids that have a
/// vertex within `tau`.
pub fn score_stability(anchors: &mut [Anchor], tau: f64) {
    let others = (Solid::ALL.len() - 1) as f64;
    let scores: Vec<f64> = anchors
        .iter()
        .map(|a| {
            let near: crate::core::types::SolidSet = anchors
                .iter()
                .filter(|b| b.solid != a.solid && a.position.distance(&b.position) <= tau)
                .map(|b| b.solid)
                .collect();
            near.len() as f64 / others
        })
        .collect();
    for (anchor, score) in anchors.iter_mut().zip(scores) {
        anchor.stability = score;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_counts_match_solids() {
        for solid in Solid::ALL {
            assert_eq!(
                canonical_vertices(solid).len() as u32,
                solid.counts().0,
                "{solid}"
            );
        }
        assert_eq!(build_anchors().len(), 50);
    }

    #[test]
    fn anchors_lie_on_unit_sphere() {
        for anchor in build_anchors() {
            assert!((anchor.position.norm() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn rotation_preserves_distance() {
        let a = LatticePoint::from_3d([1.0, 0.0, 0.0]);
        let b = LatticePoint::from_3d([0.0, 0.6, 0.8]);
        let before = a.distance(&b);
        let after = rotate_into_frame(&a).distance(&rotate_into_frame(&b));
        assert!((before - after).abs() < 1e-12);
    }

    #[test]
    fn rotation_leaves_the_first_three_axes() {
        let p = rotate_into_frame(&LatticePoint::from_3d([0.0, 0.0, 1.0]));
        assert!(p.components()[3..].iter().any(|c| c.abs() > 1e-3));
    }

    #[test]
    fn tetrahedron_sits_inside_the_cube() {
        let anchors = build_anchors();
        let tet: Vec<_> = anchors.iter().filter(|a| a.solid == Solid::Tetrahedron).collect();
        let cube: Vec<_> = anchors.iter().filter(|a| a.solid == Solid::Cube).collect();
        for t in tet {
            assert!(cube.iter().any(|c| c.position.distance(&t.position) == 0.0));
        }
    }

    #[test]
    fn stability_in_unit_interval() {
        let mut anchors = build_anchors();
        score_stability(&mut anchors, 5.0);
        assert!(anchors.iter().all(|a| (0.0..=1.0).contains(&a.stability)));
        score_stability(&mut anchors, 0.0);
        let tet = anchors.iter().find(|a| a.solid == Solid::Tetrahedron).unwrap();
        // Every tetrahedron vertex is also a cube and a dodecahedron vertex.
        assert_eq!(tet.stability, 0.5);
    }
}
