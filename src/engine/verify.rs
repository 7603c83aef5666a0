//! engine::verify
//!
//! Reconstruction check of a recovered scalar.
//!
//! # Checks
//!
//! 1. **Strict**: `k̂·G == Q` under the active curve adapter
//! 2. **Hamming**: smallest bit distance between `k̂` and any training
//!    scalar, as a fraction of the scalar width
//! 3. **Weak match**: Hamming fraction at or below a threshold, reported
//!    only when the strict check fails
//!
//! # Invariants
//!
//! - `strict` is never a false positive: it is computed from the adapter's
//!   own point equality
//! - Training pairs whose point does not match `k·G` are ignored

use crate::core::scalar::{BigScalar, GroupOrder};
use crate::curve::{CurveAdapter, CurveError, CurvePoint};

/// A known `(k, Q = k·G)` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingPair {
    pub k: BigScalar,
    pub point: CurvePoint,
}

impl TrainingPair {
    /// Build a pair by computing `k·G`.
    ///
    /// # Errors
    ///
    /// Propagates adapter errors.
    pub fn from_scalar(curve: &dyn CurveAdapter, k: BigScalar) -> Result<Self, CurveError> {
        let point = curve.point_mul(&k)?;
        Ok(Self { k, point })
    }
}

/// Outcome of verifying one candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct Verification {
    /// `k̂·G == Q`.
    pub strict: bool,
    /// Minimum Hamming fraction to a consistent training scalar.
    pub hamming: Option<f64>,
    /// Hamming fraction within the weak-match threshold, without a strict match.
    pub weak_match: bool,
    /// Training pairs that passed the consistency check.
    pub training_used: usize,
}

/// Verify `k_hat` against the query point.
///
/// # Errors
///
/// Propagates adapter errors from the scalar multiplications.
pub fn verify(
    curve: &dyn CurveAdapter,
    order: &GroupOrder,
    k_hat: &BigScalar,
    query: &CurvePoint,
    training: Option<&[TrainingPair]>,
    weak_match_threshold: f64,
) -> Result<Verification, CurveError> {
    let reconstructed = curve.point_mul(k_hat)?;
    let strict = curve.equal(&reconstructed, query);

    let width_bits = (order.byte_len() * 8) as f64;
    let mut hamming: Option<f64> = None;
    let mut training_used = 0;
    for pair in training.unwrap_or_default() {
        if !curve.equal(&curve.point_mul(&pair.k)?, &pair.point) {
            tracing::warn!(k = %pair.k, "ignoring training pair whose point is not k·G");
            continue;
        }
        training_used += 1;
        let bits = k_hat.hamming_distance_bits(&pair.k.mod_n(order), order.byte_len());
        let fraction = f64::from(bits) / width_bits;
        hamming = Some(hamming.map_or(fraction, |h| h.min(fraction)));
    }

    let weak_match = !strict && hamming.is_some_and(|h| h <= weak_match_threshold);
    Ok(Verification {
        strict,
        hamming,
        weak_match,
        training_used,
    })
}
