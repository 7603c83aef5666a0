//! recover command - Recover a scalar for one curve point

use anyhow::{bail, Context as _, Result};

use super::{interrupt, open_engine, parse_scalar, training_pairs};
use crate::cli::Context;
use crate::curve::{CurveAdapter, CurvePoint};
use crate::ui::output;

/// How the query point was given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// A scalar; the query point is `k·G`.
    Scalar(String),
    /// A SEC1-encoded point in hex.
    Point(String),
}

impl Query {
    /// Pick the query from the mutually exclusive `--k` / `--point` flags.
    pub fn from_args(k: Option<String>, point: Option<String>) -> Result<Query> {
        match (k, point) {
            (Some(k), None) => Ok(Query::Scalar(k)),
            (None, Some(point)) => Ok(Query::Point(point)),
            (Some(_), Some(_)) => bail!("--k and --point are mutually exclusive"),
            (None, None) => bail!("Either --k or --point is required"),
        }
    }

    /// Resolve to a point on `curve`.
    pub fn resolve(&self, curve: &dyn CurveAdapter) -> Result<CurvePoint> {
        match self {
            Query::Scalar(text) => Ok(curve.point_mul(&parse_scalar(text)?)?),
            Query::Point(text) => {
                let digits = text.strip_prefix("0x").unwrap_or(text);
                let bytes =
                    hex::decode(digits).with_context(|| format!("Invalid point hex '{text}'"))?;
                curve
                    .decode_point(&bytes)
                    .with_context(|| format!("Invalid {} point", curve.name()))
            }
        }
    }
}

/// Run one recovery request and print the result.
pub fn recover(
    ctx: &Context,
    curve: &str,
    query: Query,
    train: &[String],
    timeout_ms: Option<u64>,
    json: bool,
) -> Result<()> {
    let engine = open_engine(ctx, curve)?;
    let q = query.resolve(engine.curve())?;
    let training = training_pairs(engine.curve(), train)?;
    let training = (!training.is_empty()).then_some(training.as_slice());

    let result = engine.recover(&q, training, &interrupt(timeout_ms))?;

    if json {
        output::result(output::to_json(&result)?);
    } else if ctx.quiet {
        output::result(output::format_result_line(&result));
    } else {
        output::result(output::format_result(&result));
    }
    Ok(())
}
