//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Output is formatted consistently and respects the quiet flag.
//! When `--json` is enabled, output is machine-readable JSON.

use std::fmt::Display;
use std::fmt::Write as _;

use serde::Serialize;

use crate::anchors::AnchorSummary;
use crate::engine::{ConfidenceSummary, RecoveryResult};

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print a result line. Shown even in quiet mode.
pub fn result(message: impl Display) {
    println!("{}", message);
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Pretty JSON for `--json` output.
pub fn to_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

/// One-line summary of a recovery.
pub fn format_result_line(result: &RecoveryResult) -> String {
    let mut line = format!(
        "k_hat={} confidence={:.4} verified={}",
        result.k_hat, result.confidence, result.verified
    );
    if result.diagnostics.cancelled {
        line.push_str(" (cancelled)");
    }
    line
}

/// Multi-line human-readable recovery report.
pub fn format_result(result: &RecoveryResult) -> String {
    let d = &result.diagnostics;
    let mut out = String::new();
    let _ = writeln!(out, "{}", format_result_line(result));
    let _ = writeln!(out, "  curve:          {}", d.curve);
    let _ = writeln!(
        out,
        "  quadrant:       {} ({:?}{})",
        d.quadrant,
        d.polarity,
        if d.mirrored { ", mirrored" } else { "" }
    );
    let _ = writeln!(out, "  layer:          {:?}", d.layer);
    let _ = writeln!(
        out,
        "  residuals:      angle={:.6} distance={:.6}",
        d.residual_angle, d.residual_distance
    );
    let _ = writeln!(
        out,
        "  nearest:        {:?} at [{:.4}, {:.4}, {:.4}] triple_ok={}",
        d.nearest_vertices,
        d.nearest_distances[0],
        d.nearest_distances[1],
        d.nearest_distances[2],
        d.triple_ok
    );
    let _ = writeln!(
        out,
        "  search score:   {:.4} (plateau depth {})",
        d.search_confidence, d.plateau_depth
    );
    if let Some(h) = d.hamming {
        let _ = writeln!(
            out,
            "  hamming:        {:.4}{} over {} training pair(s)",
            h,
            if d.weak_match { " (weak match)" } else { "" },
            d.training_used
        );
    }
    if let Some(a) = d.attractor {
        let _ = writeln!(out, "  attractor:      base {} depth {}", a.base, a.depth);
    }
    let _ = writeln!(out, "  gcd aligned:    {}", d.gcd_aligned);
    let _ = writeln!(out, "  oracle calls:   {}", d.oracle_calls);
    let _ = write!(out, "  anchors:        {}", d.anchor_fingerprint.short());
    out
}

/// Human-readable anchor-set summary.
pub fn format_anchor_summary(summary: &AnchorSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "tolerance tau:    {}", summary.tolerance_tau);
    let _ = writeln!(
        out,
        "anchors:          {} (tet/cube/oct/dodec/icos = {:?})",
        summary.anchors, summary.anchors_per_solid
    );
    let _ = writeln!(out, "shared vertices:  {}", summary.shared_vertices);
    let _ = writeln!(out, "  per ring:       {:?}", summary.vertices_per_ring);
    let _ = writeln!(
        out,
        "  by solid count: {:?}",
        &summary.vertices_by_solid_count[2..]
    );
    let _ = writeln!(
        out,
        "  stability:      {:.4} .. {:.4}",
        summary.min_stability, summary.max_stability
    );
    let _ = writeln!(out, "attractors:       {}", summary.attractors);
    let _ = writeln!(out, "gcd/lcm:          {}", summary.gcd);
    let _ = write!(out, "fingerprint:      {}", summary.fingerprint);
    out
}

/// Human-readable batch statistics.
pub fn format_confidence_summary(summary: &ConfidenceSummary) -> String {
    format!(
        "requests={} verified={} mean={:.4} std={:.4} median={:.4} min={:.4} max={:.4} trend={:+.4}",
        summary.count,
        summary.verified,
        summary.mean,
        summary.std_dev,
        summary.median,
        summary.min,
        summary.max,
        summary.trend
    )
}
