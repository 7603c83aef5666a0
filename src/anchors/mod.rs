//! anchors
//!
//! The precomputed anchor geometry.
//!
//! # Construction
//!
//! [`AnchorSet::build`] runs once per process:
//!
//! 1. Embed the 50 Platonic-solid vertices in the shared 13-D frame
//! 2. Find shared vertices at tolerance τ and score their stability
//! 3. Assign each shared vertex a ring and clock position
//! 4. Build the tetration attractor grid
//! 5. Derive the GCD/LCM constants
//!
//! # Sharing
//!
//! An `AnchorSet` is immutable after construction. It holds only owned
//! plain data, so it is `Send + Sync` and can be shared across threads
//! behind an `Arc` without locking.
//!
//! # Example
//!
//! ```
//! use clocklattice::anchors::AnchorSet;
//! use clocklattice::core::config::AnchorConfig;
//!
//! let anchors = AnchorSet::build(&AnchorConfig::default()).unwrap();
//! assert_eq!(anchors.anchors().len(), 50);
//! assert_eq!(anchors.attractors().len(), 186);
//! assert!(anchors.shared_vertices().len() > 100);
//! ```

pub mod attractors;
pub mod gcd;
pub mod shared;
pub mod solids;

pub use attractors::AttractorPoint;
pub use gcd::GcdConstants;
pub use shared::SharedVertex;
pub use solids::Anchor;

use serde::Serialize;

use crate::core::config::{AnchorConfig, ConfigError};
use crate::core::types::{Fingerprint, Solid};
use crate::embed::ClockProjector;

/// Owning container of the anchor geometry.
#[derive(Debug, Clone)]
pub struct AnchorSet {
    config: AnchorConfig,
    clock: ClockProjector,
    anchors: Vec<Anchor>,
    shared: Vec<SharedVertex>,
    attractors: Vec<AttractorPoint>,
    gcd: GcdConstants,
    fingerprint: Fingerprint,
}

impl AnchorSet {
    /// Validate `config` and build the geometry.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the configuration is invalid.
    pub fn build(config: &AnchorConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let clock = ClockProjector::new(config.ring_sizes, config.phase_offset_degrees);

        let mut anchors = solids::build_anchors();
        solids::score_stability(&mut anchors, config.tolerance_tau);

        let shared = shared::find_shared_vertices(&anchors, config.tolerance_tau, &clock);
        let attractors = attractors::build_attractors(
            &config.attractor_prime_bases,
            config.attractor_depth_range,
        );
        let gcd = GcdConstants::derive();
        let fingerprint =
            Fingerprint::compute(shared.iter().map(|v| &v.position.components()[..]));

        tracing::debug!(
            tau = config.tolerance_tau,
            anchors = anchors.len(),
            shared = shared.len(),
            attractors = attractors.len(),
            fingerprint = fingerprint.short(),
            "built anchor set"
        );

        Ok(Self {
            config: config.clone(),
            clock,
            anchors,
            shared,
            attractors,
            gcd,
            fingerprint,
        })
    }

    /// The configuration this set was built from.
    pub fn config(&self) -> &AnchorConfig {
        &self.config
    }

    /// Ring projector matching the configuration.
    pub fn clock(&self) -> &ClockProjector {
        &self.clock
    }

    /// All 50 solid vertices.
    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    /// Shared vertices, indexed by id.
    pub fn shared_vertices(&self) -> &[SharedVertex] {
        &self.shared
    }

    /// Attractor grid.
    pub fn attractors(&self) -> &[AttractorPoint] {
        &self.attractors
    }

    /// GCD/LCM constants.
    pub fn gcd_constants(&self) -> &GcdConstants {
        &self.gcd
    }

    /// Content hash of the shared-vertex positions.
    pub fn fingerprint(&self) -> &Fingerprint {
        &self.fingerprint
    }

    /// Summary counts for display.
    pub fn summary(&self) -> AnchorSummary {
        let mut by_ring = [0usize; 4];
        let mut by_solid_count = [0usize; 6];
        for v in &self.shared {
            by_ring[usize::from(v.ring)] += 1;
            by_solid_count[v.contributing_solids.len()] += 1;
        }
        let stabilities = self.shared.iter().map(|v| v.stability);
        AnchorSummary {
            tolerance_tau: self.config.tolerance_tau,
            anchors: self.anchors.len(),
            anchors_per_solid: Solid::ALL.map(|s| {
                self.anchors.iter().filter(|a| a.solid == s).count()
            }),
            shared_vertices: self.shared.len(),
            vertices_per_ring: by_ring,
            vertices_by_solid_count: by_solid_count,
            min_stability: stabilities.clone().fold(f64::INFINITY, f64::min),
            max_stability: stabilities.fold(f64::NEG_INFINITY, f64::max),
            attractors: self.attractors.len(),
            gcd: self.gcd,
            fingerprint: self.fingerprint.clone(),
        }
    }
}

/// Display-oriented summary of an [`AnchorSet`].
#[derive(Debug, Clone, Serialize)]
pub struct AnchorSummary {
    pub tolerance_tau: f64,
    pub anchors: usize,
    pub anchors_per_solid: [usize; 5],
    pub shared_vertices: usize,
    pub vertices_per_ring: [usize; 4],
    /// Index `i` counts vertices with exactly `i` contributing solids.
    pub vertices_by_solid_count: [usize; 6],
    pub min_stability: f64,
    pub max_stability: f64,
    pub attractors: usize,
    pub gcd: GcdConstants,
    pub fingerprint: Fingerprint,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_build() {
        let set = AnchorSet::build(&AnchorConfig::default()).unwrap();
        let summary = set.summary();
        assert_eq!(summary.anchors_per_solid, [4, 8, 6, 20, 12]);
        assert_eq!(summary.shared_vertices, 140);
        assert_eq!(summary.vertices_per_ring.iter().sum::<usize>(), 140);
        assert!(summary.min_stability > 0.0 && summary.max_stability <= 1.0);
    }

    #[test]
    fn build_is_deterministic() {
        let a = AnchorSet::build(&AnchorConfig::default()).unwrap();
        let b = AnchorSet::build(&AnchorConfig::default()).unwrap();
        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn tau_changes_fingerprint() {
        let a = AnchorSet::build(&AnchorConfig::default()).unwrap();
        let b = AnchorSet::build(&AnchorConfig {
            tolerance_tau: 3.5,
            ..Default::default()
        })
        .unwrap();
        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = AnchorConfig {
            attractor_prime_bases: vec![],
            ..Default::default()
        };
        assert!(AnchorSet::build(&config).is_err());
    }

    #[test]
    fn anchor_set_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AnchorSet>();
    }
}
