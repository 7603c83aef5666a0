//! anchors::gcd
//!
//! GCD and LCM of the Platonic solids' vertex, edge, and face counts.

use std::fmt;

use num_integer::Integer;
use serde::Serialize;

use crate::core::scalar::BigScalar;
use crate::core::types::Solid;

/// The six global constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GcdConstants {
    pub gcd_vertices: u32,
    pub lcm_vertices: u32,
    pub gcd_edges: u32,
    pub lcm_edges: u32,
    pub gcd_faces: u32,
    pub lcm_faces: u32,
}

impl GcdConstants {
    /// Derive the constants from the five solids.
    pub fn derive() -> Self {
        let column = |pick: fn((u32, u32, u32)) -> u32| -> Vec<u32> {
            Solid::ALL.iter().map(|s| pick(s.counts())).collect()
        };
        let vertices = column(|c| c.0);
        let edges = column(|c| c.1);
        let faces = column(|c| c.2);
        Self {
            gcd_vertices: fold_gcd(&vertices),
            lcm_vertices: fold_lcm(&vertices),
            gcd_edges: fold_gcd(&edges),
            lcm_edges: fold_lcm(&edges),
            gcd_faces: fold_gcd(&faces),
            lcm_faces: fold_lcm(&faces),
        }
    }

    /// True if `k` is divisible by both the vertex and the edge GCD.
    pub fn admits(&self, k: &BigScalar) -> bool {
        k.rem_u32(self.gcd_vertices) == 0 && k.rem_u32(self.gcd_edges) == 0
    }
}

impl fmt::Display for GcdConstants {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "V gcd={} lcm={} | E gcd={} lcm={} | F gcd={} lcm={}",
            self.gcd_vertices,
            self.lcm_vertices,
            self.gcd_edges,
            self.lcm_edges,
            self.gcd_faces,
            self.lcm_faces
        )
    }
}

fn fold_gcd(values: &[u32]) -> u32 {
    values.iter().fold(0, |acc, v| acc.gcd(v))
}

fn fold_lcm(values: &[u32]) -> u32 {
    values.iter().fold(1, |acc, v| acc.lcm(v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants_match_solid_table() {
        insta::assert_snapshot!(
            GcdConstants::derive().to_string(),
            @"V gcd=2 lcm=120 | E gcd=6 lcm=60 | F gcd=2 lcm=120"
        );
    }

    #[test]
    fn admits_multiples_of_six() {
        let gcd = GcdConstants::derive();
        assert!(gcd.admits(&BigScalar::from_u64(0)));
        assert!(gcd.admits(&BigScalar::from_u64(42)));
        assert!(!gcd.admits(&BigScalar::from_u64(4)));
        assert!(!gcd.admits(&BigScalar::from_u64(9)));
    }

    #[test]
    fn gcd_basics() {
        assert_eq!(fold_gcd(&[12, 18]), 6);
        assert_eq!(fold_lcm(&[4, 6]), 12);
        assert_eq!(fold_gcd(&[]), 0);
    }
}
