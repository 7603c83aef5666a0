//! curve::rustcrypto
//!
//! Adapters over the RustCrypto prime-order curves.
//!
//! `k256` and `p256` expose the same `elliptic-curve` API, so both adapters
//! are generated from one macro. Only the crate path, the point tag, and
//! the hard-coded group order differ.

use crate::core::scalar::{BigScalar, GroupOrder};

use super::traits::{foreign_point, Affine, CurveAdapter, CurveError, CurvePoint, PointRepr};

/// secp256k1 group order.
const SECP256K1_ORDER: &str = "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141";

/// NIST P-256 group order.
const P256_ORDER: &str = "ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551";

fn parse_order(hex_order: &str) -> Result<GroupOrder, CurveError> {
    let bytes = hex::decode(hex_order).map_err(|e| CurveError::Adapter(e.to_string()))?;
    GroupOrder::from_bytes_be(&bytes, 256).map_err(|e| CurveError::Adapter(e.to_string()))
}

macro_rules! rustcrypto_adapter {
    ($(#[$meta:meta])* $adapter:ident, $krate:ident, $variant:ident, $name:literal, $order:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $adapter {
            order: GroupOrder,
        }

        impl $adapter {
            /// Open the curve.
            ///
            /// # Errors
            ///
            /// Returns `CurveError::Adapter` if the built-in order is unusable.
            pub fn new() -> Result<Self, CurveError> {
                Ok(Self {
                    order: parse_order($order)?,
                })
            }

            fn projective<'a>(
                &self,
                p: &'a CurvePoint,
            ) -> Result<&'a $krate::ProjectivePoint, CurveError> {
                match &p.0 {
                    PointRepr::$variant(inner) => Ok(inner),
                    _ => Err(foreign_point($name, p)),
                }
            }

            fn scalar(&self, k: &BigScalar) -> Result<$krate::Scalar, CurveError> {
                use $krate::elliptic_curve::PrimeField;

                let reduced = k.mod_n(&self.order);
                let bytes = reduced.to_bytes_be(32);
                let repr = $krate::FieldBytes::from_slice(&bytes).clone();
                Option::<$krate::Scalar>::from($krate::Scalar::from_repr(repr))
                    .ok_or_else(|| CurveError::Adapter(format!("scalar {reduced} out of range")))
            }
        }

        impl CurveAdapter for $adapter {
            fn name(&self) -> &str {
                $name
            }

            fn order(&self) -> Vec<u8> {
                self.order.value().to_bytes_be(32)
            }

            fn coordinate_len(&self) -> usize {
                32
            }

            fn generator(&self) -> CurvePoint {
                CurvePoint(PointRepr::$variant($krate::ProjectivePoint::GENERATOR))
            }

            fn point_mul(&self, k: &BigScalar) -> Result<CurvePoint, CurveError> {
                let scalar = self.scalar(k)?;
                Ok(CurvePoint(PointRepr::$variant(
                    $krate::ProjectivePoint::GENERATOR * scalar,
                )))
            }

            fn add(&self, a: &CurvePoint, b: &CurvePoint) -> Result<CurvePoint, CurveError> {
                let a = self.projective(a)?;
                let b = self.projective(b)?;
                Ok(CurvePoint(PointRepr::$variant(*a + *b)))
            }

            fn affine(&self, p: &CurvePoint) -> Result<Affine, CurveError> {
                use $krate::elliptic_curve::sec1::ToEncodedPoint;

                let encoded = self.projective(p)?.to_affine().to_encoded_point(false);
                match (encoded.x(), encoded.y()) {
                    (Some(x), Some(y)) => Ok(Affine::Point {
                        x: x.to_vec(),
                        y: y.to_vec(),
                    }),
                    _ => Ok(Affine::AtInfinity),
                }
            }

            fn equal(&self, p: &CurvePoint, q: &CurvePoint) -> bool {
                match (self.projective(p), self.projective(q)) {
                    (Ok(p), Ok(q)) => p == q,
                    _ => false,
                }
            }

            fn decode_point(&self, bytes: &[u8]) -> Result<CurvePoint, CurveError> {
                use $krate::elliptic_curve::sec1::FromEncodedPoint;

                let encoded = $krate::EncodedPoint::from_bytes(bytes)
                    .map_err(|e| CurveError::Adapter(format!("invalid SEC1 encoding: {e}")))?;
                let affine = Option::<$krate::AffinePoint>::from(
                    $krate::AffinePoint::from_encoded_point(&encoded),
                )
                .ok_or_else(|| CurveError::Adapter("point is not on the curve".to_string()))?;
                Ok(CurvePoint(PointRepr::$variant(
                    $krate::ProjectivePoint::from(affine),
                )))
            }

            fn encode_point(&self, p: &CurvePoint) -> Result<Vec<u8>, CurveError> {
                use $krate::elliptic_curve::sec1::ToEncodedPoint;

                let encoded = self.projective(p)?.to_affine().to_encoded_point(false);
                Ok(encoded.as_bytes().to_vec())
            }
        }
    };
}

rustcrypto_adapter!(
    /// secp256k1 via `k256`.
    Secp256k1Curve,
    k256,
    Secp256k1,
    "secp256k1",
    SECP256K1_ORDER
);

rustcrypto_adapter!(
    /// NIST P-256 via `p256`.
    P256Curve,
    p256,
    P256,
    "prime256v1",
    P256_ORDER
);

#[cfg(test)]
mod tests {
    use super::*;

    fn adapters() -> Vec<Box<dyn CurveAdapter>> {
        vec![
            Box::new(Secp256k1Curve::new().unwrap()),
            Box::new(P256Curve::new().unwrap()),
        ]
    }

    #[test]
    fn one_times_g_is_g() {
        for curve in adapters() {
            let q = curve.point_mul(&BigScalar::one()).unwrap();
            assert!(curve.equal(&q, &curve.generator()), "{}", curve.name());
        }
    }

    #[test]
    fn zero_and_n_give_identity() {
        for curve in adapters() {
            let n = BigScalar::from_bytes_be(&curve.order());
            for k in [BigScalar::zero(), n] {
                let p = curve.point_mul(&k).unwrap();
                assert_eq!(curve.affine(&p).unwrap(), Affine::AtInfinity);
            }
        }
    }

    #[test]
    fn order_minus_one_is_the_negated_generator() {
        for curve in adapters() {
            let top = BigScalar::from_bytes_be(&curve.order()).predecessor();
            let p = curve.point_mul(&top).unwrap();
            let sum = curve.add(&p, &curve.generator()).unwrap();
            assert_eq!(curve.affine(&sum).unwrap(), Affine::AtInfinity, "{}", curve.name());
        }
    }

    #[test]
    fn addition_matches_multiplication() {
        for curve in adapters() {
            let two_g = curve.add(&curve.generator(), &curve.generator()).unwrap();
            let expected = curve.point_mul(&BigScalar::from_u64(2)).unwrap();
            assert!(curve.equal(&two_g, &expected));
        }
    }

    #[test]
    fn sec1_round_trip() {
        for curve in adapters() {
            let p = curve.point_mul(&BigScalar::from_u64(12345)).unwrap();
            let bytes = curve.encode_point(&p).unwrap();
            assert_eq!(bytes.len(), 65);
            assert_eq!(bytes[0], 0x04);
            let back = curve.decode_point(&bytes).unwrap();
            assert!(curve.equal(&p, &back));
        }
    }

    #[test]
    fn affine_coordinates_are_fixed_width() {
        for curve in adapters() {
            let p = curve.point_mul(&BigScalar::from_u64(7)).unwrap();
            match curve.affine(&p).unwrap() {
                Affine::Point { x, y } => {
                    assert_eq!(x.len(), 32);
                    assert_eq!(y.len(), 32);
                }
                Affine::AtInfinity => panic!("7G is not the identity"),
            }
        }
    }

    #[test]
    fn secp256k1_generator_x() {
        let curve = Secp256k1Curve::new().unwrap();
        match curve.affine(&curve.generator()).unwrap() {
            Affine::Point { x, .. } => assert_eq!(
                hex::encode(x),
                "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
            ),
            Affine::AtInfinity => panic!("generator is not the identity"),
        }
    }

    #[test]
    fn foreign_points_are_rejected() {
        let k1 = Secp256k1Curve::new().unwrap();
        let r1 = P256Curve::new().unwrap();
        let g = r1.generator();
        assert!(matches!(k1.affine(&g), Err(CurveError::Adapter(_))));
        assert!(!k1.equal(&g, &g));
    }

    #[test]
    fn garbage_encoding_is_rejected() {
        let curve = Secp256k1Curve::new().unwrap();
        assert!(curve.decode_point(&[0x04, 1, 2, 3]).is_err());
    }
}
