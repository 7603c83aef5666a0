//! config command - Show or create the engine configuration

use std::path::Path;

use anyhow::{bail, Context as _, Result};

use super::load_config;
use crate::cli::Context;
use crate::core::config::EngineConfig;
use crate::ui::output;

/// Print the effective configuration as TOML.
pub fn show(ctx: &Context) -> Result<()> {
    let config = load_config(ctx)?;
    let text = config.to_toml().context("Failed to serialize configuration")?;
    output::result(text.trim_end());
    Ok(())
}

/// Write the default configuration to `path`.
pub fn init(ctx: &Context, path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists; use --force to overwrite",
            path.display()
        );
    }
    EngineConfig::default()
        .write(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    output::print(
        format!("Wrote default configuration to {}", path.display()),
        ctx.verbosity(),
    );
    Ok(())
}
