//! curve::factory
//!
//! Curve selection and creation.
//!
//! # Design
//!
//! This module is the only place that maps a curve name to a backend.
//! Callers use [`open_curve`] instead of importing a specific adapter, which
//! keeps the engine independent of the EC library in use.
//!
//! # Allow-list
//!
//! | Name | Aliases | Backend |
//! |---|---|---|
//! | `secp256k1` | | `k256` |
//! | `prime256v1` | `secp256r1`, `p256`, `P-256` | `p256` |

use std::fmt;
use std::sync::Arc;

use super::rustcrypto::{P256Curve, Secp256k1Curve};
use super::traits::{CurveAdapter, CurveError};

/// Supported curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveName {
    /// The Bitcoin curve.
    Secp256k1,
    /// NIST P-256.
    Prime256v1,
}

impl CurveName {
    /// Every curve on the allow-list.
    ///
    /// # Example
    ///
    /// ```
    /// use clocklattice::curve::CurveName;
    ///
    /// assert!(CurveName::all().contains(&CurveName::Secp256k1));
    /// ```
    pub fn all() -> &'static [CurveName] {
        &[CurveName::Secp256k1, CurveName::Prime256v1]
    }

    /// Canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            CurveName::Secp256k1 => "secp256k1",
            CurveName::Prime256v1 => "prime256v1",
        }
    }

    /// Accepted aliases, canonical name first.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            CurveName::Secp256k1 => &["secp256k1"],
            CurveName::Prime256v1 => &["prime256v1", "secp256r1", "p256", "p-256"],
        }
    }

    /// Parse a name or alias, ignoring ASCII case.
    pub fn parse(name: &str) -> Option<CurveName> {
        let lowered = name.trim().to_ascii_lowercase();
        CurveName::all()
            .iter()
            .copied()
            .find(|c| c.aliases().contains(&lowered.as_str()))
    }
}

impl fmt::Display for CurveName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Canonical names of every supported curve.
pub fn valid_curve_names() -> Vec<&'static str> {
    CurveName::all().iter().map(CurveName::as_str).collect()
}

/// Open a curve from the allow-list.
///
/// # Errors
///
/// Returns `CurveError::UnknownCurve` if the name is not recognised.
pub fn open_curve(name: &str) -> Result<Arc<dyn CurveAdapter>, CurveError> {
    let curve = CurveName::parse(name).ok_or_else(|| CurveError::UnknownCurve {
        name: name.to_string(),
        known: valid_curve_names().join(", "),
    })?;

    tracing::debug!(curve = %curve, "opening curve");
    let adapter: Arc<dyn CurveAdapter> = match curve {
        CurveName::Secp256k1 => Arc::new(Secp256k1Curve::new()?),
        CurveName::Prime256v1 => Arc::new(P256Curve::new()?),
    };
    Ok(adapter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_resolve() {
        assert_eq!(CurveName::parse("secp256k1"), Some(CurveName::Secp256k1));
        assert_eq!(CurveName::parse("SECP256R1"), Some(CurveName::Prime256v1));
        assert_eq!(CurveName::parse("P-256"), Some(CurveName::Prime256v1));
        assert_eq!(CurveName::parse("ed25519"), None);
    }

    #[test]
    fn open_reports_canonical_name() {
        assert_eq!(open_curve("p256").unwrap().name(), "prime256v1");
        assert_eq!(open_curve("secp256k1").unwrap().name(), "secp256k1");
    }

    #[test]
    fn unknown_curve_lists_known_names() {
        let err = open_curve("curve25519").unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown curve 'curve25519' (known curves: secp256k1, prime256v1)"
        );
    }
}
