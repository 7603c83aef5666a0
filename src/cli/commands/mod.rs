//! cli::commands
//!
//! Command handlers.
//!
//! Each handler loads the configuration through [`load_config`], does its
//! work against the library API and prints through [`crate::ui::output`].

pub mod anchors;
pub mod batch;
pub mod config_cmd;
pub mod curves;
pub mod recover;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context as _, Result};

use crate::anchors::AnchorSet;
use crate::cli::args::{Command, ConfigAction};
use crate::cli::Context;
use crate::core::config::EngineConfig;
use crate::core::scalar::BigScalar;
use crate::curve::{open_curve, CurveAdapter};
use crate::engine::{Engine, Interrupt, TrainingPair};

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Anchors { json } => anchors::anchors(ctx, json),
        Command::Curves => curves::curves(ctx),
        Command::Recover {
            curve,
            k,
            point,
            train,
            timeout_ms,
            json,
        } => recover::recover(
            ctx,
            &curve,
            recover::Query::from_args(k, point)?,
            &train,
            timeout_ms,
            json,
        ),
        Command::Batch {
            curve,
            scalars,
            train,
            timeout_ms,
            json,
        } => batch::batch(ctx, &curve, &scalars, &train, timeout_ms, json),
        Command::Config { action } => match action {
            ConfigAction::Show => config_cmd::show(ctx),
            ConfigAction::Init { path, force } => config_cmd::init(ctx, &path, force),
        },
    }
}

/// Load the configuration named by `--config`, or the defaults.
pub fn load_config(ctx: &Context) -> Result<EngineConfig> {
    EngineConfig::load_or_default(ctx.config.as_deref()).context("Failed to load configuration")
}

/// Build the anchor set and bind it to the named curve.
pub fn open_engine(ctx: &Context, curve: &str) -> Result<Engine> {
    let config = load_config(ctx)?;
    let adapter = open_curve(curve)?;
    let anchors = AnchorSet::build(&config.anchors).context("Failed to build anchor set")?;
    Ok(Engine::new(Arc::new(anchors), adapter, config.search)?)
}

/// Parse a decimal or 0x-hex scalar argument.
pub fn parse_scalar(text: &str) -> Result<BigScalar> {
    BigScalar::parse(text).with_context(|| format!("Invalid scalar '{text}'"))
}

/// Turn training scalars into `(k, k·G)` pairs.
pub fn training_pairs(curve: &dyn CurveAdapter, scalars: &[String]) -> Result<Vec<TrainingPair>> {
    scalars
        .iter()
        .map(|text| Ok(TrainingPair::from_scalar(curve, parse_scalar(text)?)?))
        .collect()
}

/// Interrupt with an optional deadline.
pub fn interrupt(timeout_ms: Option<u64>) -> Interrupt {
    match timeout_ms {
        Some(ms) => Interrupt::none().with_timeout(Duration::from_millis(ms)),
        None => Interrupt::none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars_parse_in_both_bases() {
        assert_eq!(parse_scalar("255").unwrap(), BigScalar::from_u64(255));
        assert_eq!(parse_scalar("0xff").unwrap(), BigScalar::from_u64(255));
        let err = parse_scalar("zz").unwrap_err();
        assert!(err.to_string().contains("Invalid scalar 'zz'"));
    }

    #[test]
    fn default_engine_opens() {
        let engine = open_engine(&Context::default(), "secp256k1").unwrap();
        assert_eq!(engine.curve().name(), "secp256k1");
        assert!(open_engine(&Context::default(), "ed25519").is_err());
    }

    #[test]
    fn training_pairs_are_consistent() {
        let curve = crate::curve::ToyCurve::tiny();
        let pairs = training_pairs(&curve, &["3".to_string(), "0x10".to_string()]).unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[1].k, BigScalar::from_u64(16));
    }
}
