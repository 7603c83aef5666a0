//! curve::mock
//!
//! Small prime-order curves for deterministic testing.
//!
//! # Design
//!
//! A [`ToyCurve`] is `y² = x³ + b` over a prime field small enough that the
//! whole group fits in a `u64` computation. The group order is prime, so
//! every non-identity point generates the group. With the default
//! `scan_radius` of 256 one scan neighbourhood spans 513 scalars, so the
//! tiny curve (n = 457) is covered completely and every recovery on it is
//! exact. The larger toy groups are only covered near the scan centers.
//!
//! Toy curves are not on the allow-list of [`crate::curve::open_curve`];
//! construct them directly.
//!
//! # Example
//!
//! ```
//! use clocklattice::core::scalar::BigScalar;
//! use clocklattice::curve::{CurveAdapter, ToyCurve};
//!
//! let curve = ToyCurve::tiny();
//! let n = BigScalar::from_bytes_be(&curve.order());
//! assert_eq!(n, BigScalar::from_u64(457));
//!
//! let q = curve.point_mul(&BigScalar::from_u64(456)).unwrap();
//! let back = curve.add(&q, &curve.generator()).unwrap();
//! assert!(curve.equal(&back, &curve.point_mul(&BigScalar::zero()).unwrap()));
//! ```

use crate::core::scalar::BigScalar;

use super::traits::{foreign_point, Affine, CurveAdapter, CurveError, CurvePoint, PointRepr};

/// A point on a toy curve, tagged with the field modulus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToyPoint {
    modulus: u64,
    coords: Option<(u64, u64)>,
}

/// `y² = x³ + b (mod p)` with prime group order `n`.
#[derive(Debug, Clone)]
pub struct ToyCurve {
    name: String,
    p: u64,
    b: u64,
    n: u64,
    g: (u64, u64),
}

impl ToyCurve {
    /// p = 499, n = 457.
    pub fn tiny() -> Self {
        Self::raw("toy-457", 499, 11, 457, (3, 323))
    }

    /// p = 1009, n = 967.
    pub fn small() -> Self {
        Self::raw("toy-967", 1009, 11, 967, (1, 711))
    }

    /// p = 65521, n = 65353.
    pub fn medium() -> Self {
        Self::raw("toy-65353", 65521, 17, 65353, (1, 64435))
    }

    fn raw(name: &str, p: u64, b: u64, n: u64, g: (u64, u64)) -> Self {
        Self {
            name: name.to_string(),
            p,
            b,
            n,
            g,
        }
    }

    fn point(&self, coords: Option<(u64, u64)>) -> ToyPoint {
        ToyPoint {
            modulus: self.p,
            coords,
        }
    }

    fn toy<'a>(&self, p: &'a CurvePoint) -> Result<&'a ToyPoint, CurveError> {
        match &p.0 {
            PointRepr::Toy(inner) if inner.modulus == self.p => Ok(inner),
            _ => Err(foreign_point(&self.name, p)),
        }
    }

    fn mul_mod(&self, a: u64, b: u64) -> u64 {
        (a * b) % self.p
    }

    fn pow_mod(&self, mut base: u64, mut exp: u64) -> u64 {
        let mut acc = 1u64;
        base %= self.p;
        while exp > 0 {
            if exp & 1 == 1 {
                acc = self.mul_mod(acc, base);
            }
            base = self.mul_mod(base, base);
            exp >>= 1;
        }
        acc
    }

    fn inverse(&self, a: u64) -> u64 {
        self.pow_mod(a, self.p - 2)
    }

    fn on_curve(&self, x: u64, y: u64) -> bool {
        let lhs = self.mul_mod(y, y);
        let rhs = (self.mul_mod(self.mul_mod(x, x), x) + self.b) % self.p;
        lhs == rhs
    }

    fn sum(&self, a: ToyPoint, b: ToyPoint) -> ToyPoint {
        let ((x1, y1), (x2, y2)) = match (a.coords, b.coords) {
            (None, _) => return b,
            (_, None) => return a,
            (Some(p1), Some(p2)) => (p1, p2),
        };
        let p = self.p;
        let lambda = if x1 == x2 {
            if (y1 + y2) % p == 0 {
                return self.point(None);
            }
            // Tangent slope for a = 0: 3x² / 2y.
            let num = self.mul_mod(3, self.mul_mod(x1, x1));
            self.mul_mod(num, self.inverse(self.mul_mod(2, y1)))
        } else {
            let num = (y2 + p - y1) % p;
            let den = (x2 + p - x1) % p;
            self.mul_mod(num, self.inverse(den))
        };
        let x3 = (self.mul_mod(lambda, lambda) + 2 * p - x1 - x2) % p;
        let y3 = (self.mul_mod(lambda, (x1 + p - x3) % p) + p - y1) % p;
        self.point(Some((x3, y3)))
    }

    fn times(&self, mut k: u64) -> ToyPoint {
        let mut acc = self.point(None);
        let mut addend = self.point(Some(self.g));
        while k > 0 {
            if k & 1 == 1 {
                acc = self.sum(acc, addend);
            }
            addend = self.sum(addend, addend);
            k >>= 1;
        }
        acc
    }

    fn coordinate_bytes(&self, v: u64) -> Vec<u8> {
        let len = self.coordinate_len();
        v.to_be_bytes()[8 - len..].to_vec()
    }
}

impl CurveAdapter for ToyCurve {
    fn name(&self) -> &str {
        &self.name
    }

    fn order(&self) -> Vec<u8> {
        let bytes = self.n.to_be_bytes();
        let skip = bytes.iter().take_while(|b| **b == 0).count();
        bytes[skip..].to_vec()
    }

    fn coordinate_len(&self) -> usize {
        let bits = 64 - self.p.leading_zeros() as usize;
        bits.div_ceil(8)
    }

    fn generator(&self) -> CurvePoint {
        CurvePoint(PointRepr::Toy(self.point(Some(self.g))))
    }

    fn point_mul(&self, k: &BigScalar) -> Result<CurvePoint, CurveError> {
        let reduced = k.rem_u32(self.n as u32);
        Ok(CurvePoint(PointRepr::Toy(self.times(u64::from(reduced)))))
    }

    fn add(&self, a: &CurvePoint, b: &CurvePoint) -> Result<CurvePoint, CurveError> {
        let a = *self.toy(a)?;
        let b = *self.toy(b)?;
        Ok(CurvePoint(PointRepr::Toy(self.sum(a, b))))
    }

    fn affine(&self, p: &CurvePoint) -> Result<Affine, CurveError> {
        Ok(match self.toy(p)?.coords {
            Some((x, y)) => Affine::Point {
                x: self.coordinate_bytes(x),
                y: self.coordinate_bytes(y),
            },
            None => Affine::AtInfinity,
        })
    }

    fn equal(&self, p: &CurvePoint, q: &CurvePoint) -> bool {
        match (self.toy(p), self.toy(q)) {
            (Ok(p), Ok(q)) => p == q,
            _ => false,
        }
    }

    fn decode_point(&self, bytes: &[u8]) -> Result<CurvePoint, CurveError> {
        let len = self.coordinate_len();
        match bytes {
            [0x00] => Ok(CurvePoint(PointRepr::Toy(self.point(None)))),
            [0x04, rest @ ..] if rest.len() == 2 * len => {
                let read = |chunk: &[u8]| chunk.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b));
                let x = read(&rest[..len]);
                let y = read(&rest[len..]);
                if x >= self.p || y >= self.p || !self.on_curve(x, y) {
                    return Err(CurveError::Adapter("point is not on the curve".to_string()));
                }
                Ok(CurvePoint(PointRepr::Toy(self.point(Some((x, y))))))
            }
            _ => Err(CurveError::Adapter(format!(
                "{} accepts only uncompressed SEC1 points of {} bytes",
                self.name,
                1 + 2 * len
            ))),
        }
    }

    fn encode_point(&self, p: &CurvePoint) -> Result<Vec<u8>, CurveError> {
        Ok(match self.toy(p)?.coords {
            Some((x, y)) => {
                let mut out = vec![0x04];
                out.extend(self.coordinate_bytes(x));
                out.extend(self.coordinate_bytes(y));
                out
            }
            None => vec![0x00],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generators_lie_on_their_curves() {
        for curve in [ToyCurve::tiny(), ToyCurve::small(), ToyCurve::medium()] {
            assert!(curve.on_curve(curve.g.0, curve.g.1), "{}", curve.name);
        }
    }

    #[test]
    fn order_annihilates_generator() {
        for curve in [ToyCurve::tiny(), ToyCurve::small(), ToyCurve::medium()] {
            let g = curve.point(Some(curve.g));
            assert_eq!(curve.times(curve.n).coords, None, "{}", curve.name);
            let n_minus_one = curve.times(curve.n - 1);
            assert_eq!(curve.sum(n_minus_one, g).coords, None);
        }
    }

    #[test]
    fn multiples_stay_on_curve() {
        let curve = ToyCurve::tiny();
        for k in 1..curve.n {
            let (x, y) = curve.times(k).coords.unwrap();
            assert!(curve.on_curve(x, y), "{k}G");
        }
    }

    #[test]
    fn order_bytes_are_minimal() {
        assert_eq!(ToyCurve::tiny().order(), vec![0x01, 0xc9]);
        assert_eq!(ToyCurve::tiny().coordinate_len(), 2);
    }

    #[test]
    fn encode_decode() {
        let curve = ToyCurve::small();
        let p = curve.point_mul(&BigScalar::from_u64(99)).unwrap();
        let bytes = curve.encode_point(&p).unwrap();
        assert_eq!(bytes.len(), 5);
        assert!(curve.equal(&curve.decode_point(&bytes).unwrap(), &p));

        let identity = curve.point_mul(&BigScalar::zero()).unwrap();
        assert_eq!(curve.encode_point(&identity).unwrap(), vec![0x00]);
        assert!(curve.decode_point(&[0x04, 0, 1, 0, 1]).is_err());
    }

    #[test]
    fn curves_do_not_mix() {
        let a = ToyCurve::tiny();
        let b = ToyCurve::small();
        assert!(a.affine(&b.generator()).is_err());
    }
}
