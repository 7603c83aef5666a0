//! anchors command - Summarize the anchor set

use anyhow::{Context as _, Result};

use super::load_config;
use crate::anchors::AnchorSet;
use crate::cli::Context;
use crate::ui::output;

/// Build the anchor set and print its summary.
pub fn anchors(ctx: &Context, json: bool) -> Result<()> {
    let config = load_config(ctx)?;
    let anchors = AnchorSet::build(&config.anchors).context("Failed to build anchor set")?;
    let summary = anchors.summary();

    if json {
        output::result(output::to_json(&summary)?);
    } else if ctx.quiet {
        output::result(format!(
            "{} shared vertices, fingerprint {}",
            summary.shared_vertices,
            summary.fingerprint.short()
        ));
    } else {
        output::result(output::format_anchor_summary(&summary));
    }
    Ok(())
}
