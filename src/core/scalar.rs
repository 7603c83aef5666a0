//! core::scalar
//!
//! Unsigned scalars bounded by a curve's group order.
//!
//! # Types
//!
//! - [`BigScalar`] - Candidate scalar, always reduced into `[0, n)` by the
//!   operations that take a [`GroupOrder`]
//! - [`GroupOrder`] - The group order `n` together with the configured width
//!
//! # Width
//!
//! The width is fixed when a [`GroupOrder`] is created. An order wider than
//! the configured width is rejected with [`ScalarError::InvalidWidth`];
//! every scalar the engine produces afterwards fits in `width_bits`.
//!
//! # Example
//!
//! ```
//! use clocklattice::core::scalar::{BigScalar, GroupOrder};
//!
//! let order = GroupOrder::from_u64(457, 256).unwrap();
//! let a = BigScalar::from_u64(450);
//! let b = BigScalar::from_u64(10);
//! assert_eq!(a.add(&b, &order), BigScalar::from_u64(3));
//! assert_eq!(b.sub(&a, &order), BigScalar::from_u64(17));
//! ```

use std::fmt;

use num_bigint::BigUint;
use num_traits::{One, ToPrimitive, Zero};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Errors from scalar construction and parsing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScalarError {
    /// The group order does not fit in the configured width.
    #[error("group order needs {order_bits} bits but the scalar width is {width_bits}")]
    InvalidWidth { order_bits: u64, width_bits: u32 },

    /// The group order is smaller than 2.
    #[error("group order must be at least 2")]
    DegenerateOrder,

    /// A textual scalar could not be parsed.
    #[error("invalid scalar: {0}")]
    Parse(String),
}

/// An unsigned scalar.
///
/// Values are plain by-value records. Modular operations take the
/// [`GroupOrder`] explicitly and always return a reduced value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct BigScalar(BigUint);

impl BigScalar {
    /// The scalar zero.
    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    /// The scalar one.
    pub fn one() -> Self {
        Self(BigUint::one())
    }

    /// Build a scalar from a machine integer.
    pub fn from_u64(value: u64) -> Self {
        Self(BigUint::from(value))
    }

    /// Build a scalar from big-endian bytes of any length.
    pub fn from_bytes_be(bytes: &[u8]) -> Self {
        Self(BigUint::from_bytes_be(bytes))
    }

    /// Parse a decimal string or a `0x`-prefixed hex string.
    ///
    /// # Errors
    ///
    /// Returns `ScalarError::Parse` for empty or malformed input.
    pub fn parse(text: &str) -> Result<Self, ScalarError> {
        let text = text.trim();
        let parsed = match text
            .strip_prefix("0x")
            .or_else(|| text.strip_prefix("0X"))
        {
            Some(hex_digits) => BigUint::parse_bytes(hex_digits.as_bytes(), 16),
            None => BigUint::parse_bytes(text.as_bytes(), 10),
        };
        parsed
            .map(Self)
            .ok_or_else(|| ScalarError::Parse(format!("'{text}' is not a decimal or 0x-hex integer")))
    }

    /// Left-padded big-endian encoding of exactly `len` bytes.
    ///
    /// Values wider than `len` keep their low-order bytes.
    pub fn to_bytes_be(&self, len: usize) -> Vec<u8> {
        let raw = self.0.to_bytes_be();
        if raw.len() >= len {
            return raw[raw.len() - len..].to_vec();
        }
        let mut out = vec![0u8; len - raw.len()];
        out.extend_from_slice(&raw);
        out
    }

    /// Minimal lowercase hex encoding (`"00"` for zero).
    pub fn to_hex(&self) -> String {
        hex::encode(self.0.to_bytes_be())
    }

    /// Parse the output of [`BigScalar::to_hex`].
    ///
    /// # Errors
    ///
    /// Returns `ScalarError::Parse` if the string is not valid hex.
    pub fn from_hex(text: &str) -> Result<Self, ScalarError> {
        let padded;
        let digits = if text.len() % 2 == 1 {
            padded = format!("0{text}");
            padded.as_str()
        } else {
            text
        };
        hex::decode(digits)
            .map(|bytes| Self::from_bytes_be(&bytes))
            .map_err(|e| ScalarError::Parse(format!("'{text}': {e}")))
    }

    /// `(self + rhs) mod n`.
    pub fn add(&self, rhs: &BigScalar, order: &GroupOrder) -> BigScalar {
        Self((&self.0 + &rhs.0) % &order.n)
    }

    /// `(self - rhs) mod n`.
    pub fn sub(&self, rhs: &BigScalar, order: &GroupOrder) -> BigScalar {
        let a = &self.0 % &order.n;
        let b = &rhs.0 % &order.n;
        if a >= b {
            Self(a - b)
        } else {
            Self(&order.n - (b - a))
        }
    }

    /// `(self * factor) mod n`.
    pub fn mul_small(&self, factor: u32, order: &GroupOrder) -> BigScalar {
        Self((&self.0 * BigUint::from(factor)) % &order.n)
    }

    /// `self mod n`.
    pub fn mod_n(&self, order: &GroupOrder) -> BigScalar {
        Self(&self.0 % &order.n)
    }

    /// Population count of the XOR of both operands, each encoded as
    /// `width_bytes` left-padded big-endian bytes.
    pub fn hamming_distance_bits(&self, other: &BigScalar, width_bytes: usize) -> u32 {
        self.to_bytes_be(width_bytes)
            .iter()
            .zip(other.to_bytes_be(width_bytes))
            .map(|(a, b)| (a ^ b).count_ones())
            .sum()
    }

    /// Remainder by a small modulus.
    pub fn rem_u32(&self, modulus: u32) -> u32 {
        (&self.0 % BigUint::from(modulus)).to_u32().unwrap_or(0)
    }

    /// Number of significant bits (0 for zero).
    pub fn bits(&self) -> u64 {
        self.0.bits()
    }

    /// True if the scalar is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// The value as a `u64`, if it fits.
    pub fn to_u64(&self) -> Option<u64> {
        self.0.to_u64()
    }

    // -------------------------------------------------------------------------
    // Window arithmetic
    //
    // Search windows are half-open ranges `[lo, hi)` inside `[0, n]`. These
    // helpers do not reduce modulo n.
    // -------------------------------------------------------------------------

    /// `lo + (hi - lo) / 2`; requires `self <= hi`.
    pub fn midpoint(&self, hi: &BigScalar) -> BigScalar {
        if hi.0 <= self.0 {
            return self.clone();
        }
        Self(&self.0 + ((&hi.0 - &self.0) >> 1u32))
    }

    /// `self + 1` without reduction.
    pub fn successor(&self) -> BigScalar {
        Self(&self.0 + 1u32)
    }

    /// `self - 1` without reduction, saturating at zero.
    pub fn predecessor(&self) -> BigScalar {
        if self.0.is_zero() {
            BigScalar::zero()
        } else {
            Self(&self.0 - 1u32)
        }
    }

    /// `hi - self`, saturating at zero.
    pub fn distance_to(&self, hi: &BigScalar) -> BigScalar {
        if hi.0 <= self.0 {
            BigScalar::zero()
        } else {
            Self(&hi.0 - &self.0)
        }
    }

    /// True if `hi > self + 1`.
    pub fn gap_exceeds_one(&self, hi: &BigScalar) -> bool {
        hi.0 > &self.0 + 1u32
    }
}

impl fmt::Display for BigScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl From<u64> for BigScalar {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl Serialize for BigScalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for BigScalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        BigScalar::from_hex(&text).map_err(serde::de::Error::custom)
    }
}

/// The order `n` of a curve's prime-order subgroup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupOrder {
    n: BigUint,
    width_bits: u32,
}

impl GroupOrder {
    /// Build from big-endian bytes.
    ///
    /// # Errors
    ///
    /// - `ScalarError::DegenerateOrder` if `n < 2`
    /// - `ScalarError::InvalidWidth` if `n` needs more than `width_bits` bits
    pub fn from_bytes_be(bytes: &[u8], width_bits: u32) -> Result<Self, ScalarError> {
        let n = BigUint::from_bytes_be(bytes);
        if n < BigUint::from(2u32) {
            return Err(ScalarError::DegenerateOrder);
        }
        if n.bits() > u64::from(width_bits) {
            return Err(ScalarError::InvalidWidth {
                order_bits: n.bits(),
                width_bits,
            });
        }
        Ok(Self { n, width_bits })
    }

    /// Build from a machine integer.
    ///
    /// # Errors
    ///
    /// Same as [`GroupOrder::from_bytes_be`].
    pub fn from_u64(n: u64, width_bits: u32) -> Result<Self, ScalarError> {
        Self::from_bytes_be(&n.to_be_bytes(), width_bits)
    }

    /// The order as a scalar. Note this value is not itself reduced.
    pub fn value(&self) -> BigScalar {
        BigScalar(self.n.clone())
    }

    /// Bit length of `n`.
    pub fn bits(&self) -> u64 {
        self.n.bits()
    }

    /// Configured scalar width in bits.
    pub fn width_bits(&self) -> u32 {
        self.width_bits
    }

    /// Bytes needed to encode any scalar below `n`.
    pub fn byte_len(&self) -> usize {
        ((self.n.bits() + 7) / 8) as usize
    }

    /// True if `k < n`.
    pub fn contains(&self, k: &BigScalar) -> bool {
        k.0 < self.n
    }

    /// `floor(n * numerator / denominator)`.
    pub fn portion(&self, numerator: u32, denominator: u32) -> BigScalar {
        if denominator == 0 {
            return BigScalar::zero();
        }
        BigScalar((&self.n * BigUint::from(numerator)) / BigUint::from(denominator))
    }

    /// `floor(n * fraction)` for a fraction in `[0, 1)`, clamped below `n`.
    ///
    /// The fraction is taken at 53-bit resolution.
    pub fn scale(&self, fraction: f64) -> BigScalar {
        const RESOLUTION: u32 = 53;
        let clamped = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let fixed = (clamped * (1u64 << RESOLUTION) as f64) as u64;
        let scaled = (&self.n * BigUint::from(fixed)) >> RESOLUTION;
        if scaled >= self.n {
            BigScalar(&self.n - 1u32)
        } else {
            BigScalar(scaled)
        }
    }
}

impl fmt::Display for GroupOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.n.to_bytes_be()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy() -> GroupOrder {
        GroupOrder::from_u64(457, 256).unwrap()
    }

    #[test]
    fn add_and_sub_wrap() {
        let n = toy();
        let a = BigScalar::from_u64(456);
        assert_eq!(a.add(&BigScalar::one(), &n), BigScalar::zero());
        assert_eq!(
            BigScalar::zero().sub(&BigScalar::one(), &n),
            BigScalar::from_u64(456)
        );
    }

    #[test]
    fn mul_small_reduces() {
        let n = toy();
        assert_eq!(
            BigScalar::from_u64(200).mul_small(3, &n),
            BigScalar::from_u64(600 - 457)
        );
    }

    #[test]
    fn width_is_enforced() {
        let err = GroupOrder::from_u64(1 << 20, 16).unwrap_err();
        assert_eq!(
            err,
            ScalarError::InvalidWidth {
                order_bits: 21,
                width_bits: 16
            }
        );
        assert_eq!(
            GroupOrder::from_u64(1, 256).unwrap_err(),
            ScalarError::DegenerateOrder
        );
    }

    #[test]
    fn left_padded_bytes() {
        let k = BigScalar::from_u64(0x0102);
        assert_eq!(k.to_bytes_be(4), vec![0, 0, 1, 2]);
        assert_eq!(BigScalar::from_bytes_be(&[0, 0, 1, 2]), k);
        assert_eq!(BigScalar::zero().to_bytes_be(2), vec![0, 0]);
    }

    #[test]
    fn hamming_counts_differing_bits() {
        let a = BigScalar::from_u64(0b1010);
        let b = BigScalar::from_u64(0b0110);
        assert_eq!(a.hamming_distance_bits(&b, 32), 2);
        assert_eq!(a.hamming_distance_bits(&a, 32), 0);
    }

    #[test]
    fn parse_accepts_decimal_and_hex() {
        assert_eq!(BigScalar::parse("42").unwrap(), BigScalar::from_u64(42));
        assert_eq!(BigScalar::parse("0x2a").unwrap(), BigScalar::from_u64(42));
        assert!(BigScalar::parse("forty-two").is_err());
        assert!(BigScalar::parse("").is_err());
    }

    #[test]
    fn hex_round_trip_is_minimal() {
        assert_eq!(BigScalar::zero().to_hex(), "00");
        assert_eq!(BigScalar::from_u64(0x1ff).to_hex(), "01ff");
        assert_eq!(BigScalar::from_hex("1ff").unwrap(), BigScalar::from_u64(0x1ff));
    }

    #[test]
    fn window_helpers() {
        let lo = BigScalar::from_u64(10);
        let hi = BigScalar::from_u64(21);
        assert_eq!(lo.midpoint(&hi), BigScalar::from_u64(15));
        assert!(lo.gap_exceeds_one(&hi));
        assert!(!BigScalar::from_u64(20).gap_exceeds_one(&hi));
        assert_eq!(lo.distance_to(&hi), BigScalar::from_u64(11));
    }

    #[test]
    fn scale_stays_below_order() {
        let n = toy();
        assert_eq!(n.scale(0.0), BigScalar::zero());
        assert_eq!(n.scale(0.5), BigScalar::from_u64(228));
        assert!(n.contains(&n.scale(1.0)));
        assert!(n.contains(&n.scale(f64::NAN)));
        assert_eq!(n.portion(1, 4), BigScalar::from_u64(114));
    }

    #[test]
    fn serde_uses_hex_strings() {
        let k = BigScalar::from_u64(42);
        let json = serde_json::to_string(&k).unwrap();
        assert_eq!(json, "\"2a\"");
        let back: BigScalar = serde_json::from_str(&json).unwrap();
        assert_eq!(back, k);
    }
}
