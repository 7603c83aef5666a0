//! engine
//!
//! Services recovery requests against a shared anchor set.
//!
//! # Lifecycle
//!
//! Every request follows the same path:
//!
//! ```text
//! Embed Q -> Nearest three -> Quadrant prior -> Search (A, B, C) -> Verify -> Calibrate
//! ```
//!
//! # Invariants
//!
//! - `0 <= k_hat < n` for every result
//! - Confidence lies in `[0, 1]`
//! - `verified` is true only if `k_hat·G == Q` under the same adapter
//! - Identical inputs produce identical results
//! - The engine never mutates shared state; requests run in parallel
//!   without locks
//!
//! Low confidence is a result, not an error. Only [`EngineError`] variants
//! are ever surfaced.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use clocklattice::anchors::AnchorSet;
//! use clocklattice::core::config::{AnchorConfig, SearchConfig};
//! use clocklattice::core::scalar::BigScalar;
//! use clocklattice::curve::{CurveAdapter, ToyCurve};
//! use clocklattice::engine::{Engine, Interrupt};
//!
//! let anchors = Arc::new(AnchorSet::build(&AnchorConfig::default()).unwrap());
//! let curve: Arc<dyn CurveAdapter> = Arc::new(ToyCurve::tiny());
//! let engine = Engine::new(anchors, curve.clone(), SearchConfig::default()).unwrap();
//!
//! let q = curve.point_mul(&BigScalar::from_u64(77)).unwrap();
//! let result = engine.recover(&q, None, &Interrupt::none()).unwrap();
//! assert!(result.verified);
//! assert_eq!(result.k_hat, BigScalar::from_u64(77));
//! ```

pub mod cancel;
pub mod confidence;
pub mod nearest;
pub mod plateau;
pub mod quadrant;
pub mod search;
pub mod verify;

pub use cancel::{CancelToken, Interrupt};
pub use confidence::ConfidenceSummary;
pub use nearest::NearestTriple;
pub use quadrant::{Polarity, QuadrantId, Window};
pub use search::{Candidate, Layer, SearchOutcome, Searcher};
pub use verify::{TrainingPair, Verification};

use std::sync::Arc;

use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;

use crate::anchors::attractors::nearest_attractor;
use crate::anchors::AnchorSet;
use crate::core::config::{AnchorConfig, ConfigError, SearchConfig};
use crate::core::lattice::LatticePoint;
use crate::core::scalar::{BigScalar, GroupOrder, ScalarError};
use crate::core::types::Fingerprint;
use crate::curve::{CurveAdapter, CurveError, CurvePoint};
use crate::embed::clock::RINGS;
use crate::embed::{point_to_lattice, scalar_to_lattice};

/// Errors surfaced by recovery.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineError {
    /// The curve name is not on the allow-list.
    #[error("unknown curve '{name}' (known curves: {known})")]
    UnknownCurve { name: String, known: String },

    /// The curve order does not fit the configured scalar width.
    #[error("group order needs {order_bits} bits but curve_bits is {width_bits}")]
    InvalidWidth { order_bits: u64, width_bits: u32 },

    /// Too few shared vertices to triangulate.
    #[error("need at least 3 shared vertices, found {found}; raise tolerance_tau")]
    NoAnchors { found: usize },

    /// The search configuration failed validation.
    #[error("invalid search configuration: {0}")]
    InvalidConfig(String),

    /// The curve backend failed.
    #[error("curve backend error: {0}")]
    Adapter(String),
}

impl From<ConfigError> for EngineError {
    fn from(err: ConfigError) -> Self {
        EngineError::InvalidConfig(err.to_string())
    }
}

impl From<CurveError> for EngineError {
    fn from(err: CurveError) -> Self {
        match err {
            CurveError::UnknownCurve { name, known } => EngineError::UnknownCurve { name, known },
            CurveError::Adapter(message) => EngineError::Adapter(message),
        }
    }
}

impl From<ScalarError> for EngineError {
    fn from(err: ScalarError) -> Self {
        match err {
            ScalarError::InvalidWidth {
                order_bits,
                width_bits,
            } => EngineError::InvalidWidth {
                order_bits,
                width_bits,
            },
            other => EngineError::Adapter(other.to_string()),
        }
    }
}

/// The attractor nearest to `k̂`'s embedding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AttractorRef {
    pub base: u32,
    pub depth: u32,
}

/// Per-request diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostics {
    pub curve: String,
    pub quadrant: QuadrantId,
    pub polarity: Polarity,
    /// The mirrored window was searched too.
    pub mirrored: bool,
    pub residual_angle: f64,
    pub residual_distance: f64,
    pub plateau_depth: u32,
    pub triple_ok: bool,
    /// Ids of the three nearest shared vertices, closest first.
    pub nearest_vertices: [usize; 3],
    pub nearest_distances: [f64; 3],
    /// Uncalibrated search score.
    pub search_confidence: f64,
    /// Hamming fraction to the closest training scalar.
    pub hamming: Option<f64>,
    pub weak_match: bool,
    pub training_used: usize,
    pub cancelled: bool,
    pub layer: Layer,
    pub oracle_calls: u64,
    pub attractor: Option<AttractorRef>,
    /// `k̂` is divisible by the vertex and edge GCDs.
    pub gcd_aligned: bool,
    pub anchor_fingerprint: Fingerprint,
}

/// Result of one recovery request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecoveryResult {
    pub k_hat: BigScalar,
    pub confidence: f64,
    pub verified: bool,
    pub diagnostics: Diagnostics,
}

/// Recovery service over one anchor set and one curve.
///
/// Cloning is cheap; clones share the anchor set and adapter.
#[derive(Debug, Clone)]
pub struct Engine {
    anchors: Arc<AnchorSet>,
    curve: Arc<dyn CurveAdapter>,
    search: SearchConfig,
    order: GroupOrder,
}

impl Engine {
    /// Bind an anchor set to a curve.
    ///
    /// # Errors
    ///
    /// - `EngineError::InvalidWidth` if the curve order is wider than
    ///   `curve_bits`
    /// - `EngineError::InvalidConfig` if `search` fails validation
    /// - `EngineError::Adapter` if the adapter reports a degenerate order
    pub fn new(
        anchors: Arc<AnchorSet>,
        curve: Arc<dyn CurveAdapter>,
        mut search: SearchConfig,
    ) -> Result<Self, EngineError> {
        search.validate()?;
        let order = GroupOrder::from_bytes_be(&curve.order(), anchors.config().curve_bits)?;
        // Rings past the outermost read the outermost.
        search.search_ring = search.search_ring.min(RINGS - 1);
        tracing::debug!(
            curve = curve.name(),
            order_bits = order.bits(),
            shared = anchors.shared_vertices().len(),
            "engine ready"
        );
        Ok(Self {
            anchors,
            curve,
            search,
            order,
        })
    }

    pub fn anchors(&self) -> &AnchorSet {
        &self.anchors
    }

    pub fn curve(&self) -> &dyn CurveAdapter {
        self.curve.as_ref()
    }

    pub fn order(&self) -> &GroupOrder {
        &self.order
    }

    pub fn search_config(&self) -> &SearchConfig {
        &self.search
    }

    /// Recover a scalar for `q`.
    ///
    /// # Errors
    ///
    /// - `EngineError::NoAnchors` if the anchor set has fewer than three
    ///   shared vertices
    /// - `EngineError::Adapter` if the curve backend fails
    pub fn recover(
        &self,
        q: &CurvePoint,
        training: Option<&[TrainingPair]>,
        interrupt: &Interrupt,
    ) -> Result<RecoveryResult, EngineError> {
        let query = point_to_lattice(self.curve.as_ref(), q)?;
        let outcome = self.searcher(interrupt).run(&query, Some(q))?;
        let verification = verify::verify(
            self.curve.as_ref(),
            &self.order,
            &outcome.candidate.k_hat,
            q,
            training,
            self.search.weak_match_threshold,
        )?;
        Ok(self.finish(outcome, &verification))
    }

    /// Recover every query in parallel, preserving order.
    ///
    /// # Errors
    ///
    /// The first error of any request.
    pub fn recover_batch(
        &self,
        queries: &[CurvePoint],
        training: Option<&[TrainingPair]>,
        interrupt: &Interrupt,
    ) -> Result<Vec<RecoveryResult>, EngineError> {
        queries
            .par_iter()
            .map(|q| self.recover(q, training, interrupt))
            .collect()
    }

    /// Run the search for a bare lattice point, without verification.
    ///
    /// Exact hits are judged by embedding distance alone.
    ///
    /// # Errors
    ///
    /// Same as [`Engine::recover`].
    pub fn search_lattice(
        &self,
        query: &LatticePoint,
        interrupt: &Interrupt,
    ) -> Result<SearchOutcome, EngineError> {
        self.searcher(interrupt).run(query, None)
    }

    fn searcher<'a>(&'a self, interrupt: &'a Interrupt) -> Searcher<'a> {
        Searcher::new(
            &self.anchors,
            self.curve.as_ref(),
            &self.order,
            &self.search,
            interrupt,
        )
    }

    fn finish(&self, outcome: SearchOutcome, verification: &Verification) -> RecoveryResult {
        let search_confidence = outcome.score();
        let confidence = confidence::calibrate(search_confidence, verification);
        let candidate = outcome.candidate;

        let embedded = scalar_to_lattice(&candidate.k_hat, self.order.byte_len());
        let attractors = self.anchors.attractors();
        let attractor = nearest_attractor(attractors, &embedded).map(|(i, _)| AttractorRef {
            base: attractors[i].base,
            depth: attractors[i].depth,
        });

        tracing::info!(
            curve = self.curve.name(),
            k_hat = %candidate.k_hat,
            confidence,
            verified = verification.strict,
            layer = ?outcome.layer,
            "recovery finished"
        );

        RecoveryResult {
            verified: verification.strict,
            confidence,
            diagnostics: Diagnostics {
                curve: self.curve.name().to_string(),
                quadrant: candidate.quadrant,
                polarity: candidate.quadrant.polarity(),
                mirrored: outcome.mirrored,
                residual_angle: candidate.residual_angle,
                residual_distance: candidate.residual_distance,
                plateau_depth: candidate.plateau_depth,
                triple_ok: candidate.triple_ok,
                nearest_vertices: outcome.triple.vertices,
                nearest_distances: outcome.triple.distances,
                search_confidence,
                hamming: verification.hamming,
                weak_match: verification.weak_match,
                training_used: verification.training_used,
                cancelled: outcome.cancelled,
                layer: outcome.layer,
                oracle_calls: outcome.oracle_calls,
                attractor,
                gcd_aligned: self.anchors.gcd_constants().admits(&candidate.k_hat),
                anchor_fingerprint: self.anchors.fingerprint().clone(),
            },
            k_hat: candidate.k_hat,
        }
    }
}

/// Build the anchor geometry for `config`.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` if the configuration is invalid.
pub fn build_anchor_set(config: &AnchorConfig) -> Result<AnchorSet, ConfigError> {
    AnchorSet::build(config)
}

/// One-shot recovery with the default search configuration.
///
/// # Errors
///
/// Same as [`Engine::new`] and [`Engine::recover`].
pub fn recover(
    anchors: &Arc<AnchorSet>,
    curve: &Arc<dyn CurveAdapter>,
    q: &CurvePoint,
    training: Option<&[TrainingPair]>,
) -> Result<RecoveryResult, EngineError> {
    Engine::new(Arc::clone(anchors), Arc::clone(curve), SearchConfig::default())?.recover(
        q,
        training,
        &Interrupt::none(),
    )
}
