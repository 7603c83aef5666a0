//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Anchor Config
//!
//! [`AnchorConfig`] controls how the anchor geometry is built. It has
//! exactly six options, all with defaults.
//!
//! # Search Config
//!
//! [`SearchConfig`] tunes the recovery search. None of its options change
//! the anchor geometry.
//!
//! # Validation
//!
//! Config values are validated after parsing; an invalid config is
//! rejected before any anchor is built.

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Options for building an anchor set.
///
/// # Example
///
/// ```toml
/// tolerance_tau = 5.0
/// curve_bits = 256
/// attractor_prime_bases = [2, 3, 5, 7, 11, 13]
/// attractor_depth_range = [29, 59]
/// ring_sizes = [12, 60, 60, 100]
/// phase_offset_degrees = 42.0
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AnchorConfig {
    /// Maximum π·φ distance between anchors of different solids that
    /// still counts as a shared vertex.
    pub tolerance_tau: f64,

    /// Scalar width in bits.
    pub curve_bits: u32,

    /// Prime bases of the attractor grid.
    pub attractor_prime_bases: Vec<u32>,

    /// Inclusive depth interval of the attractor grid.
    pub attractor_depth_range: [u32; 2],

    /// Sizes of the four clock rings, innermost first.
    pub ring_sizes: [u32; 4],

    /// Phase offset applied on ring 0 before quantization.
    pub phase_offset_degrees: f64,
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self {
            tolerance_tau: 5.0,
            curve_bits: 256,
            attractor_prime_bases: vec![2, 3, 5, 7, 11, 13],
            attractor_depth_range: [29, 59],
            ring_sizes: [12, 60, 60, 100],
            phase_offset_degrees: 42.0,
        }
    }
}

impl AnchorConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.tolerance_tau.is_finite() || self.tolerance_tau < 0.0 {
            return Err(ConfigError::InvalidValue(format!(
                "tolerance_tau must be a finite non-negative number, got {}",
                self.tolerance_tau
            )));
        }

        if self.curve_bits == 0 || self.curve_bits % 8 != 0 {
            return Err(ConfigError::InvalidValue(format!(
                "curve_bits must be a positive multiple of 8, got {}",
                self.curve_bits
            )));
        }

        if self.attractor_prime_bases.is_empty() {
            return Err(ConfigError::InvalidValue(
                "attractor_prime_bases cannot be empty".to_string(),
            ));
        }
        if let Some(bad) = self
            .attractor_prime_bases
            .iter()
            .find(|b| !is_prime(**b))
        {
            return Err(ConfigError::InvalidValue(format!(
                "attractor base {bad} is not prime"
            )));
        }

        let [lo, hi] = self.attractor_depth_range;
        if lo > hi {
            return Err(ConfigError::InvalidValue(format!(
                "attractor_depth_range [{lo}, {hi}] is empty"
            )));
        }

        if let Some(bad) = self.ring_sizes.iter().find(|n| **n < 4) {
            return Err(ConfigError::InvalidValue(format!(
                "ring sizes must be at least 4, got {bad}"
            )));
        }

        if !self.phase_offset_degrees.is_finite() {
            return Err(ConfigError::InvalidValue(
                "phase_offset_degrees must be finite".to_string(),
            ));
        }

        Ok(())
    }

    /// Number of attractors this configuration produces.
    pub fn attractor_count(&self) -> usize {
        let [lo, hi] = self.attractor_depth_range;
        let depths = if hi >= lo { (hi - lo + 1) as usize } else { 0 };
        self.attractor_prime_bases.len() * depths
    }
}

/// Tuning for the recovery search.
///
/// # Example
///
/// ```toml
/// scan_radius = 256
/// plateau_window = 8
/// plateau_threshold = 1e-6
/// angle_threshold = 0.01
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Half-width Δ of each fine-scan neighbourhood.
    pub scan_radius: u64,

    /// Number of residuals W in the plateau window.
    pub plateau_window: usize,

    /// Variance below which a residual window counts as a plateau.
    pub plateau_threshold: f64,

    /// Residual angle (radians) above which the mirrored window is tried.
    pub angle_threshold: f64,

    /// Iterations allowed on top of `log2(|window|)` in the binary search.
    pub extra_iterations: u32,

    /// Ring whose angle drives the binary search.
    pub search_ring: usize,

    /// Also scan the neighbourhood of zero.
    pub origin_scan: bool,

    /// Largest Hamming fraction that still counts as a weak match.
    pub weak_match_threshold: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            scan_radius: 256,
            plateau_window: 8,
            plateau_threshold: 1e-6,
            angle_threshold: 0.01,
            extra_iterations: 32,
            search_ring: 0,
            origin_scan: true,
            weak_match_threshold: 0.25,
        }
    }
}

impl SearchConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.plateau_window < 2 {
            return Err(ConfigError::InvalidValue(format!(
                "plateau_window must be at least 2, got {}",
                self.plateau_window
            )));
        }
        if !self.plateau_threshold.is_finite() || self.plateau_threshold < 0.0 {
            return Err(ConfigError::InvalidValue(
                "plateau_threshold must be finite and non-negative".to_string(),
            ));
        }
        if !self.angle_threshold.is_finite() || self.angle_threshold < 0.0 {
            return Err(ConfigError::InvalidValue(
                "angle_threshold must be finite and non-negative".to_string(),
            ));
        }
        if self.search_ring > 3 {
            return Err(ConfigError::InvalidValue(format!(
                "search_ring must be in 0..=3, got {}",
                self.search_ring
            )));
        }
        if !(0.0..=1.0).contains(&self.weak_match_threshold) {
            return Err(ConfigError::InvalidValue(format!(
                "weak_match_threshold must be in [0, 1], got {}",
                self.weak_match_threshold
            )));
        }
        Ok(())
    }
}

/// Complete engine configuration file.
///
/// # Example
///
/// ```toml
/// [anchors]
/// tolerance_tau = 5.0
///
/// [search]
/// scan_radius = 512
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Anchor geometry.
    pub anchors: AnchorConfig,

    /// Search tuning.
    pub search: SearchConfig,
}

impl EngineConfig {
    /// Validate both sections.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.anchors.validate()?;
        self.search.validate()
    }
}

fn is_prime(n: u32) -> bool {
    if n < 2 {
        return false;
    }
    let mut d = 2u32;
    while d.saturating_mul(d) <= n {
        if n % d == 0 {
            return false;
        }
        d += 1;
    }
    true
}
