//! embed
//!
//! Deterministic maps from scalars and curve points into the lattice space,
//! and from lattice points onto the clock rings.
//!
//! # Scalar-to-lattice
//!
//! The left-padded big-endian encoding of a scalar is split into 13 bit
//! slices of `ceil(width / 13)` bits, most significant first; the last
//! slice takes whatever bits remain. Slice `i` is normalized to `u ∈ [0, 1]`
//! and modulated as `0.5 + 0.3·sin(2π·(ψᵢ·u + i) / 13)`.
//!
//! # Point-to-lattice
//!
//! The affine x coordinate fills the first 7 components and y the last 6,
//! each with the same slicing and modulation (continuing the frequency
//! index). The result is centered on zero and projected onto the unit
//! sphere. The point at infinity maps to the origin.
//!
//! # Lattice-to-clock
//!
//! See [`clock::ClockProjector`].

pub mod clock;

pub use clock::{ClockProjector, ClockReading};

use std::f64::consts::PI;

use crate::core::lattice::{LatticePoint, DIM, FREQUENCIES};
use crate::core::scalar::BigScalar;
use crate::curve::{Affine, CurveAdapter, CurveError, CurvePoint};

/// Components taken by the x coordinate.
pub const X_COMPONENTS: usize = DIM.div_ceil(2);

/// Split `bytes` into `parts` bit slices and normalize each into `[0, 1]`.
///
/// Slices with no bits (possible when `parts` exceeds the bit count)
/// normalize to zero.
pub fn slice_fractions(bytes: &[u8], parts: usize) -> Vec<f64> {
    let total = bytes.len() * 8;
    if parts == 0 {
        return Vec::new();
    }
    let per = total.div_ceil(parts);
    (0..parts)
        .map(|i| {
            let start = (i * per).min(total);
            let end = ((i + 1) * per).min(total);
            let width = end - start;
            if width == 0 {
                return 0.0;
            }
            let value = (start..end).fold(0.0f64, |acc, bit| {
                let set = (bytes[bit / 8] >> (7 - bit % 8)) & 1;
                acc * 2.0 + f64::from(set)
            });
            let max = 2f64.powi(width as i32) - 1.0;
            value / max
        })
        .collect()
}

/// The smooth modulation `0.5 + 0.3·sin(2π·(ψ·u + i) / 13)`.
pub fn modulate(frequency: f64, u: f64, index: usize) -> f64 {
    0.5 + 0.3 * (2.0 * PI * (frequency * u + index as f64) / DIM as f64).sin()
}

fn modulate_into(out: &mut [f64; DIM], fractions: &[f64], offset: usize) {
    for (k, u) in fractions.iter().enumerate() {
        let i = offset + k;
        out[i] = modulate(f64::from(FREQUENCIES[i]), *u, i);
    }
}

/// Embed a scalar encoded on `width_bytes` bytes.
pub fn scalar_to_lattice(k: &BigScalar, width_bytes: usize) -> LatticePoint {
    let bytes = k.to_bytes_be(width_bytes);
    let mut out = [0.0; DIM];
    modulate_into(&mut out, &slice_fractions(&bytes, DIM), 0);
    LatticePoint::new(out)
}

/// Embed affine coordinates.
pub fn affine_to_lattice(affine: &Affine) -> LatticePoint {
    let (x, y) = match affine {
        Affine::Point { x, y } => (x, y),
        Affine::AtInfinity => return LatticePoint::ORIGIN,
    };
    let mut out = [0.0; DIM];
    modulate_into(&mut out, &slice_fractions(x, X_COMPONENTS), 0);
    modulate_into(
        &mut out,
        &slice_fractions(y, DIM - X_COMPONENTS),
        X_COMPONENTS,
    );
    for c in out.iter_mut() {
        *c -= 0.5;
    }
    LatticePoint::new(out).normalized()
}

/// Embed a curve point.
///
/// # Errors
///
/// Propagates adapter errors from the affine conversion.
pub fn point_to_lattice(
    curve: &dyn CurveAdapter,
    point: &CurvePoint,
) -> Result<LatticePoint, CurveError> {
    Ok(affine_to_lattice(&curve.affine(point)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::ToyCurve;

    #[test]
    fn slices_split_high_bits_first() {
        // 16 bits into 3 slices of 6, 6, 4 bits.
        let fractions = slice_fractions(&[0b1111_1100, 0b0000_1111], 3);
        assert_eq!(fractions, vec![1.0, 0.0, 1.0]);
    }

    #[test]
    fn empty_slices_are_zero() {
        let fractions = slice_fractions(&[0xff], 13);
        assert_eq!(fractions.len(), 13);
        assert_eq!(&fractions[..8], &[1.0; 8]);
        assert_eq!(&fractions[8..], &[0.0; 5]);
    }

    #[test]
    fn scalar_embedding_stays_in_band() {
        for k in [0u64, 1, 42, u64::MAX] {
            let p = scalar_to_lattice(&BigScalar::from_u64(k), 32);
            assert!(p
                .components()
                .iter()
                .all(|c| (0.2 - 1e-12..=0.8 + 1e-12).contains(c)));
        }
    }

    #[test]
    fn scalar_embedding_distinguishes_neighbours() {
        let a = scalar_to_lattice(&BigScalar::from_u64(41), 32);
        let b = scalar_to_lattice(&BigScalar::from_u64(42), 32);
        assert_ne!(a, b);
    }

    #[test]
    fn point_embedding_is_unit_or_origin() {
        let curve = ToyCurve::tiny();
        for k in 0..20u64 {
            let p = curve.point_mul(&BigScalar::from_u64(k)).unwrap();
            let lattice = point_to_lattice(&curve, &p).unwrap();
            assert!(lattice.is_finite());
            if k == 0 {
                assert_eq!(lattice, LatticePoint::ORIGIN);
            } else {
                assert!((lattice.norm() - 1.0).abs() < 1e-9, "k = {k}");
            }
        }
    }

    #[test]
    fn x_takes_seven_components() {
        assert_eq!(X_COMPONENTS, 7);
    }
}
