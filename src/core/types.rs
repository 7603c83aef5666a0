//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`Solid`] - One of the five Platonic solids
//! - [`SolidSet`] - Set of solids contributing to a shared vertex
//! - [`Fingerprint`] - Content hash of an anchor set
//!
//! # Examples
//!
//! ```
//! use clocklattice::core::types::{Solid, SolidSet};
//!
//! let mut set = SolidSet::empty();
//! set.insert(Solid::Cube);
//! set.insert(Solid::Dodecahedron);
//! assert_eq!(set.len(), 2);
//! assert!(set.contains(Solid::Cube));
//! assert_eq!(Solid::Icosahedron.counts(), (12, 30, 20));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// The five Platonic solids, in anchor order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Solid {
    Tetrahedron,
    Cube,
    Octahedron,
    Dodecahedron,
    Icosahedron,
}

impl Solid {
    /// All solids in id order.
    pub const ALL: [Solid; 5] = [
        Solid::Tetrahedron,
        Solid::Cube,
        Solid::Octahedron,
        Solid::Dodecahedron,
        Solid::Icosahedron,
    ];

    /// Numeric id in `0..5`.
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Look up a solid by id.
    pub fn from_id(id: u8) -> Option<Solid> {
        Solid::ALL.get(usize::from(id)).copied()
    }

    /// (vertices, edges, faces).
    pub fn counts(self) -> (u32, u32, u32) {
        match self {
            Solid::Tetrahedron => (4, 6, 4),
            Solid::Cube => (8, 12, 6),
            Solid::Octahedron => (6, 12, 8),
            Solid::Dodecahedron => (20, 30, 12),
            Solid::Icosahedron => (12, 30, 20),
        }
    }

    /// Lowercase display name.
    pub fn name(self) -> &'static str {
        match self {
            Solid::Tetrahedron => "tetrahedron",
            Solid::Cube => "cube",
            Solid::Octahedron => "octahedron",
            Solid::Dodecahedron => "dodecahedron",
            Solid::Icosahedron => "icosahedron",
        }
    }
}

impl fmt::Display for Solid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A set of solids, stored as a bitmask.
///
/// Serializes as the sorted list of member solids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SolidSet(u8);

impl SolidSet {
    /// The empty set.
    pub fn empty() -> Self {
        Self(0)
    }

    /// Add a solid.
    pub fn insert(&mut self, solid: Solid) {
        self.0 |= 1 << solid.id();
    }

    /// Membership test.
    pub fn contains(&self, solid: Solid) -> bool {
        self.0 & (1 << solid.id()) != 0
    }

    /// Number of member solids.
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// True if no solid is a member.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Union of two sets.
    pub fn union(&self, other: &SolidSet) -> SolidSet {
        Self(self.0 | other.0)
    }

    /// Members in id order.
    pub fn iter(&self) -> impl Iterator<Item = Solid> + '_ {
        Solid::ALL.into_iter().filter(move |s| self.contains(*s))
    }
}

impl FromIterator<Solid> for SolidSet {
    fn from_iter<I: IntoIterator<Item = Solid>>(iter: I) -> Self {
        let mut set = SolidSet::empty();
        for solid in iter {
            set.insert(solid);
        }
        set
    }
}

impl Serialize for SolidSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for SolidSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let members = Vec::<Solid>::deserialize(deserializer)?;
        Ok(members.into_iter().collect())
    }
}

impl fmt::Display for SolidSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(Solid::name).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}

/// Content hash of an anchor set.
///
/// Two anchor sets built from the same configuration always produce the
/// same fingerprint, so a fingerprint in a recovery result identifies the
/// geometry it was computed against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Hash a sequence of real vectors bit-exactly.
    pub fn compute<'a>(vectors: impl IntoIterator<Item = &'a [f64]>) -> Self {
        let mut hasher = Sha256::new();
        for vector in vectors {
            for component in vector {
                hasher.update(component.to_bits().to_be_bytes());
            }
            hasher.update(b"\n");
        }
        Self(hex::encode(hasher.finalize()))
    }

    /// Get the fingerprint as a hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 12 hex digits, for display.
    pub fn short(&self) -> &str {
        &self.0[..self.0.len().min(12)]
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
