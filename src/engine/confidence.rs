//! engine::confidence
//!
//! Scoring of search candidates and calibration against verification.
//!
//! # Search score
//!
//! ```text
//! score = 0.35·(1 − clamp(res_angle/π))
//!       + 0.25·(1 − clamp(res_distance/d_ref))
//!       + 0.15·triple_ok
//!       + 0.15·quadrant_agreement
//!       + 0.10·min(plateau_depth/plateau_ref, 1)
//! ```
//!
//! with `d_ref = 2σ` (the largest distance between two unit vectors) and
//! `plateau_ref = 2`.
//!
//! # Calibration
//!
//! A strictly verified result has confidence 1. Anything else is capped at
//! [`UNVERIFIED_CEILING`] times the search score, further discounted by the
//! Hamming fraction to the nearest training scalar when training is given.

use serde::Serialize;

use crate::core::lattice::SIGMA;
use crate::engine::search::Candidate;
use crate::engine::verify::Verification;

/// Weights of the five score terms.
pub const WEIGHTS: [f64; 5] = [0.35, 0.25, 0.15, 0.15, 0.10];

/// Reference residual distance.
pub const DISTANCE_REF: f64 = 2.0 * SIGMA;

/// Plateau depth at which the plateau term saturates.
pub const PLATEAU_REF: f64 = 2.0;

/// Highest confidence an unverified result can receive.
pub const UNVERIFIED_CEILING: f64 = 0.15;

fn unit(x: f64) -> f64 {
    if x.is_nan() {
        return 1.0;
    }
    x.clamp(0.0, 1.0)
}

/// Search score of a candidate in `[0, 1]`.
pub fn score(candidate: &Candidate, quadrant_agreement: bool) -> f64 {
    let [w_angle, w_distance, w_triple, w_quadrant, w_plateau] = WEIGHTS;
    let angle = 1.0 - unit(candidate.residual_angle / std::f64::consts::PI);
    let distance = 1.0 - unit(candidate.residual_distance / DISTANCE_REF);
    let triple = if candidate.triple_ok { 1.0 } else { 0.0 };
    let quadrant = if quadrant_agreement { 1.0 } else { 0.0 };
    let plateau = unit(f64::from(candidate.plateau_depth) / PLATEAU_REF);

    let total = w_angle * angle
        + w_distance * distance
        + w_triple * triple
        + w_quadrant * quadrant
        + w_plateau * plateau;
    unit(total)
}

/// Final confidence of a verified or unverified result.
pub fn calibrate(search_score: f64, verification: &Verification) -> f64 {
    if verification.strict {
        return 1.0;
    }
    let discount = verification.hamming.map_or(1.0, |h| 1.0 - unit(h));
    unit(unit(search_score) * UNVERIFIED_CEILING * discount)
}

/// Aggregate statistics over a batch of confidences.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfidenceSummary {
    pub count: usize,
    pub verified: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    /// Least-squares slope of confidence against request index.
    pub trend: f64,
}

impl ConfidenceSummary {
    /// Summarize `(confidence, verified)` pairs in request order.
    ///
    /// An empty batch summarizes to all zeros.
    pub fn from_results(results: impl IntoIterator<Item = (f64, bool)>) -> Self {
        let (values, flags): (Vec<f64>, Vec<bool>) = results.into_iter().unzip();
        let count = values.len();
        if count == 0 {
            return Self {
                count: 0,
                verified: 0,
                mean: 0.0,
                std_dev: 0.0,
                median: 0.0,
                min: 0.0,
                max: 0.0,
                trend: 0.0,
            };
        }

        let n = count as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;

        let mut sorted = values.clone();
        sorted.sort_by(f64::total_cmp);
        let median = if count % 2 == 1 {
            sorted[count / 2]
        } else {
            (sorted[count / 2 - 1] + sorted[count / 2]) / 2.0
        };

        let x_mean = (n - 1.0) / 2.0;
        let (sxy, sxx) = values
            .iter()
            .enumerate()
            .fold((0.0, 0.0), |(sxy, sxx), (i, v)| {
                let dx = i as f64 - x_mean;
                (sxy + dx * (v - mean), sxx + dx * dx)
            });
        let trend = if sxx > 0.0 { sxy / sxx } else { 0.0 };

        Self {
            count,
            verified: flags.iter().filter(|v| **v).count(),
            mean,
            std_dev: variance.sqrt(),
            median,
            min: sorted[0],
            max: sorted[count - 1],
            trend,
        }
    }
}
