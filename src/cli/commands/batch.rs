//! batch command - Recover many scalars in parallel

use anyhow::Result;
use serde::Serialize;

use super::{interrupt, open_engine, parse_scalar, training_pairs};
use crate::cli::Context;
use crate::curve::CurvePoint;
use crate::engine::{ConfidenceSummary, RecoveryResult};
use crate::ui::output;

#[derive(Serialize)]
struct BatchReport<'a> {
    summary: &'a ConfidenceSummary,
    results: &'a [RecoveryResult],
}

/// Recover `k·G` for every scalar and print the results and their summary.
pub fn batch(
    ctx: &Context,
    curve: &str,
    scalars: &[String],
    train: &[String],
    timeout_ms: Option<u64>,
    json: bool,
) -> Result<()> {
    let engine = open_engine(ctx, curve)?;
    let queries = scalars
        .iter()
        .map(|text| Ok(engine.curve().point_mul(&parse_scalar(text)?)?))
        .collect::<Result<Vec<CurvePoint>>>()?;
    let training = training_pairs(engine.curve(), train)?;
    let training = (!training.is_empty()).then_some(training.as_slice());

    let results = engine.recover_batch(&queries, training, &interrupt(timeout_ms))?;
    let summary = ConfidenceSummary::from_results(results.iter().map(|r| (r.confidence, r.verified)));

    if json {
        output::result(output::to_json(&BatchReport {
            summary: &summary,
            results: &results,
        })?);
        return Ok(());
    }

    let verbosity = ctx.verbosity();
    for (text, result) in scalars.iter().zip(&results) {
        output::print(format!("{text}: {}", output::format_result_line(result)), verbosity);
    }
    output::result(output::format_confidence_summary(&summary));
    Ok(())
}
