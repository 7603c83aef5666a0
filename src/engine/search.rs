//! engine::search
//!
//! The three-layer recursive search.
//!
//! # Layers
//!
//! 1. **Triangulation**: weight the quadrant hints of the three nearest
//!    shared vertices by `1/(dᵢ+ε)` into a seed inside the query's prior
//!    window. A query sitting on a shared vertex locks onto it and skips
//!    the remaining layers.
//! 2. **Binary search**: bisect the prior window, using the embedding of
//!    `mid·G` as the oracle and the signed shortest arc on the search ring
//!    as the comparison. A pass that never gets within the angle threshold
//!    is retried once in the mirrored window.
//! 3. **Fine scan**: walk `±Δ` around the best scalar so far, the seed, and
//!    (optionally) zero, one generator addition per step. Plateaus in the
//!    residuals are counted but do not end a neighbourhood early.
//!
//! # Selection
//!
//! Samples are ranked by π·φ distance to the query, then residual angle,
//! then strength-weighted distance of the scalar's embedding to the
//! nearest attractor, then by the smaller scalar. A sample whose point is
//! the query point ends the search immediately.
//!
//! # Cancellation
//!
//! The interrupt is polled after triangulation, once per binary-search
//! iteration, before each scan center and once per scan step. A triggered
//! interrupt returns the best sample so far with `cancelled` set.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::anchors::attractors::nearest_attractor;
use crate::anchors::AnchorSet;
use crate::core::config::SearchConfig;
use crate::core::lattice::{signed_arc, LatticePoint};
use crate::core::scalar::{BigScalar, GroupOrder};
use crate::curve::{Affine, CurveAdapter, CurvePoint};
use crate::embed::{point_to_lattice, scalar_to_lattice};
use crate::engine::cancel::Interrupt;
use crate::engine::confidence;
use crate::engine::nearest::{nearest_three, NearestTriple};
use crate::engine::plateau::PlateauDetector;
use crate::engine::quadrant::{prior_window, QuadrantId, Window};
use crate::engine::EngineError;

/// Distances at or below this count as coincident.
pub const EXACT_EPSILON: f64 = 1e-12;

/// Plateau depth credited to an anchor lock, one per skipped layer.
pub const ANCHOR_LOCK_DEPTH: u32 = 2;

const HINT_EPSILON: f64 = 1e-9;

/// The layer that produced the final candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    AnchorLock,
    Triangulation,
    BinarySearch,
    FineScan,
}

/// Best scalar found by a search, with its residuals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub k_hat: BigScalar,
    /// Shortest arc on the search ring between `k̂·G` and the query.
    pub residual_angle: f64,
    /// π·φ distance between the embeddings of `k̂·G` and the query.
    pub residual_distance: f64,
    /// Quadrant of the query's ring-0 angle.
    pub quadrant: QuadrantId,
    /// Plateaus detected across all layers.
    pub plateau_depth: u32,
    pub triple_ok: bool,
}

/// Everything a search run reports.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub candidate: Candidate,
    pub triple: NearestTriple,
    /// Prior window of the query's quadrant.
    pub window: Window,
    pub layer: Layer,
    /// The mirrored window was searched.
    pub mirrored: bool,
    pub cancelled: bool,
    /// The candidate's point is the query point.
    pub exact: bool,
    /// Number of oracle evaluations.
    pub oracle_calls: u64,
}

impl SearchOutcome {
    /// True if the candidate lies in the query's prior window.
    pub fn quadrant_agreement(&self) -> bool {
        self.window.contains(&self.candidate.k_hat)
    }

    /// Uncalibrated search score.
    pub fn score(&self) -> f64 {
        confidence::score(&self.candidate, self.quadrant_agreement())
    }
}

#[derive(Debug, Clone)]
struct Sample {
    k: BigScalar,
    distance: f64,
    /// Signed arc from the query angle.
    arc: f64,
}

struct QueryView<'q> {
    point: LatticePoint,
    target: Option<&'q CurvePoint>,
    angle: f64,
}

struct Progress {
    best: Sample,
    layer: Layer,
    plateau_depth: u32,
    oracle_calls: u64,
    cancelled: bool,
    exact: bool,
}

/// One search request, borrowing the shared state it runs against.
pub struct Searcher<'a> {
    anchors: &'a AnchorSet,
    curve: &'a dyn CurveAdapter,
    order: &'a GroupOrder,
    config: &'a SearchConfig,
    interrupt: &'a Interrupt,
}

impl<'a> Searcher<'a> {
    pub fn new(
        anchors: &'a AnchorSet,
        curve: &'a dyn CurveAdapter,
        order: &'a GroupOrder,
        config: &'a SearchConfig,
        interrupt: &'a Interrupt,
    ) -> Self {
        Self {
            anchors,
            curve,
            order,
            config,
            interrupt,
        }
    }

    /// Search for the scalar whose point embeds closest to `query`.
    ///
    /// When `target` is given, a sample whose point equals it is an exact
    /// hit; otherwise a sample embedding within [`EXACT_EPSILON`] is.
    ///
    /// # Errors
    ///
    /// - `EngineError::NoAnchors` if fewer than three shared vertices exist
    /// - `EngineError::Adapter` if the curve backend fails
    pub fn run(
        &self,
        query: &LatticePoint,
        target: Option<&CurvePoint>,
    ) -> Result<SearchOutcome, EngineError> {
        let triple = nearest_three(self.anchors, query).ok_or(EngineError::NoAnchors {
            found: self.anchors.shared_vertices().len(),
        })?;
        let clock = self.anchors.clock();
        let quadrant = QuadrantId::from_angle(clock.angle(query, 0));
        let window = prior_window(quadrant, self.order);
        let view = QueryView {
            point: *query,
            target,
            angle: clock.angle(query, self.config.search_ring),
        };

        // Layer A. The identity embeds at the origin, equidistant from
        // every sample, so it is tried as the seed directly.
        let identity = match target {
            Some(t) => self.curve.affine(t)? == Affine::AtInfinity,
            None => false,
        };
        let seed = if identity {
            BigScalar::zero()
        } else {
            self.triangulate(&triple, quadrant, &window)
        };
        if !identity && triple.distances[0] <= EXACT_EPSILON {
            tracing::debug!(vertex = triple.vertices[0], seed = %seed, "anchor lock");
            return Ok(SearchOutcome {
                candidate: Candidate {
                    k_hat: seed,
                    residual_angle: 0.0,
                    residual_distance: 0.0,
                    quadrant,
                    plateau_depth: ANCHOR_LOCK_DEPTH,
                    triple_ok: triple.triple_ok,
                },
                triple,
                window,
                layer: Layer::AnchorLock,
                mirrored: false,
                cancelled: false,
                exact: false,
                oracle_calls: 0,
            });
        }

        let seed_point = self.curve.point_mul(&seed)?;
        let (seed_sample, hit) = self.evaluate(&view, seed.clone(), &seed_point)?;
        let mut progress = Progress {
            best: seed_sample,
            layer: Layer::Triangulation,
            plateau_depth: 0,
            oracle_calls: 1,
            cancelled: false,
            exact: hit,
        };
        tracing::debug!(
            seed = %seed,
            quadrant = %quadrant,
            distance = progress.best.distance,
            "triangulated seed"
        );

        // Layer B
        let mut mirrored = false;
        if !progress.exact {
            if self.interrupt.triggered() {
                progress.cancelled = true;
            } else {
                let best_arc = self.bisect(&view, &window, &mut progress)?;
                if !progress.exact && !progress.cancelled && best_arc > self.config.angle_threshold {
                    tracing::debug!(best_arc, mirror = %quadrant.mirror(), "retrying in mirrored window");
                    mirrored = true;
                    self.bisect(&view, &prior_window(quadrant.mirror(), self.order), &mut progress)?;
                }
            }
        }

        // Layer C
        if !progress.exact && !progress.cancelled {
            let mut centers: Vec<BigScalar> = Vec::with_capacity(3);
            let origin = self.config.origin_scan.then(BigScalar::zero);
            for center in [Some(progress.best.k.clone()), Some(seed), origin].into_iter().flatten() {
                if !centers.contains(&center) {
                    centers.push(center);
                }
            }
            self.fine_scan(&view, &centers, &mut progress)?;
        }

        tracing::debug!(
            k_hat = %progress.best.k,
            layer = ?progress.layer,
            plateau_depth = progress.plateau_depth,
            oracle_calls = progress.oracle_calls,
            exact = progress.exact,
            cancelled = progress.cancelled,
            "search finished"
        );

        Ok(SearchOutcome {
            candidate: Candidate {
                k_hat: progress.best.k,
                residual_angle: progress.best.arc.abs(),
                residual_distance: progress.best.distance,
                quadrant,
                plateau_depth: progress.plateau_depth,
                triple_ok: triple.triple_ok,
            },
            triple,
            window,
            layer: progress.layer,
            mirrored,
            cancelled: progress.cancelled,
            exact: progress.exact,
            oracle_calls: progress.oracle_calls,
        })
    }

    /// Weighted quadrant hints, scaled by `n` and clamped into `window`.
    fn triangulate(&self, triple: &NearestTriple, quadrant: QuadrantId, window: &Window) -> BigScalar {
        let shared = self.anchors.shared_vertices();
        let (sum, total) = triple
            .vertices
            .iter()
            .zip(triple.distances)
            .fold((0.0, 0.0), |(sum, total), (id, d)| {
                let weight = 1.0 / (d + HINT_EPSILON);
                (
                    sum + weight * shared[*id].quadrant_hints[quadrant.index()],
                    total + weight,
                )
            });
        window.clamp(self.order.scale(sum / total))
    }

    /// One binary-search pass over `window`. Returns the smallest absolute
    /// arc seen.
    fn bisect(
        &self,
        view: &QueryView<'_>,
        window: &Window,
        progress: &mut Progress,
    ) -> Result<f64, EngineError> {
        let mut lo = window.lo.clone();
        let mut hi = window.hi.clone();
        let max_iterations = window.size_bits() + u64::from(self.config.extra_iterations);
        let mut plateau =
            PlateauDetector::new(self.config.plateau_window, self.config.plateau_threshold);
        let mut best_arc = f64::INFINITY;
        let mut iterations = 0u64;

        while lo.gap_exceeds_one(&hi) && iterations < max_iterations {
            if self.interrupt.triggered() {
                progress.cancelled = true;
                break;
            }
            iterations += 1;

            let mid = lo.midpoint(&hi);
            let point = self.curve.point_mul(&mid)?;
            progress.oracle_calls += 1;
            let (sample, hit) = self.evaluate(view, mid.clone(), &point)?;
            let arc = sample.arc;
            best_arc = best_arc.min(arc.abs());
            if plateau.push(arc.abs()) {
                progress.plateau_depth += 1;
            }
            if self.offer(progress, sample, Layer::BinarySearch, hit) {
                break;
            }

            if arc < 0.0 {
                lo = mid.successor();
            } else {
                hi = mid;
            }
        }

        tracing::debug!(lo = %window.lo, hi = %window.hi, iterations, best_arc, "binary search pass");
        Ok(best_arc)
    }

    /// Scan `[c − Δ, c + Δ] mod n` around each center.
    fn fine_scan(
        &self,
        view: &QueryView<'_>,
        centers: &[BigScalar],
        progress: &mut Progress,
    ) -> Result<(), EngineError> {
        let radius = BigScalar::from_u64(self.config.scan_radius);
        let wanted = self.config.scan_radius.saturating_mul(2).saturating_add(1);
        let span = match self.order.value().to_u64() {
            Some(n) => wanted.min(n),
            None => wanted,
        };
        let generator = self.curve.generator();
        let one = BigScalar::one();

        for center in centers {
            if self.interrupt.triggered() {
                progress.cancelled = true;
                return Ok(());
            }
            let mut plateau =
                PlateauDetector::new(self.config.plateau_window, self.config.plateau_threshold);
            let mut k = center.sub(&radius, self.order);
            let mut point = self.curve.point_mul(&k)?;

            for step in 0..span {
                if self.interrupt.triggered() {
                    progress.cancelled = true;
                    return Ok(());
                }
                if step > 0 {
                    point = self.curve.add(&point, &generator)?;
                    k = k.add(&one, self.order);
                }
                progress.oracle_calls += 1;
                let (sample, hit) = self.evaluate(view, k.clone(), &point)?;
                let residual = sample.distance;
                if self.offer(progress, sample, Layer::FineScan, hit) {
                    tracing::debug!(center = %center, step, "exact hit");
                    return Ok(());
                }
                if plateau.push(residual) {
                    progress.plateau_depth += 1;
                    tracing::debug!(center = %center, step, "plateau");
                }
            }
        }
        Ok(())
    }

    /// Embed `point` and measure it against the query view.
    fn evaluate(
        &self,
        view: &QueryView<'_>,
        k: BigScalar,
        point: &CurvePoint,
    ) -> Result<(Sample, bool), EngineError> {
        let p = point_to_lattice(self.curve, point)?;
        let distance = view.point.distance(&p);
        let theta = self.anchors.clock().angle(&p, self.config.search_ring);
        let hit = match view.target {
            Some(target) => self.curve.equal(point, target),
            None => distance <= EXACT_EPSILON,
        };
        Ok((
            Sample {
                k,
                distance,
                arc: signed_arc(theta, view.angle),
            },
            hit,
        ))
    }

    /// Record `sample` if it beats the current best. Returns true on an
    /// exact hit.
    fn offer(&self, progress: &mut Progress, sample: Sample, layer: Layer, hit: bool) -> bool {
        if hit {
            progress.best = sample;
            progress.layer = layer;
            progress.exact = true;
            return true;
        }
        if self.rank(&sample, &progress.best) == Ordering::Less {
            progress.best = sample;
            progress.layer = layer;
        }
        false
    }

    fn rank(&self, a: &Sample, b: &Sample) -> Ordering {
        a.distance
            .total_cmp(&b.distance)
            .then_with(|| a.arc.abs().total_cmp(&b.arc.abs()))
            .then_with(|| self.attractor_bias(&a.k).total_cmp(&self.attractor_bias(&b.k)))
            .then_with(|| a.k.cmp(&b.k))
    }

    fn attractor_bias(&self, k: &BigScalar) -> f64 {
        let embedded = scalar_to_lattice(k, self.order.byte_len());
        nearest_attractor(self.anchors.attractors(), &embedded).map_or(f64::INFINITY, |(_, d)| d)
    }
}
