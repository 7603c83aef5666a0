//! curves command - List supported curves

use anyhow::Result;

use crate::cli::Context;
use crate::curve::CurveName;
use crate::ui::output;

/// Print the curve allow-list, one curve per line.
pub fn curves(ctx: &Context) -> Result<()> {
    for curve in CurveName::all() {
        let aliases = &curve.aliases()[1..];
        if aliases.is_empty() || ctx.quiet {
            output::result(curve.as_str());
        } else {
            output::result(format!("{} (aliases: {})", curve, aliases.join(", ")));
        }
    }
    Ok(())
}
