//! Architecture enforcement tests.
//!
//! The curve backends are reachable only through `CurveAdapter`, the
//! logger is installed only by the binary, and library code propagates
//! errors instead of panicking. These tests catch regressions in CI.
//!
//! # Test Categories
//!
//! 1. **Backend Isolation** - only `src/curve/` names `k256` or `p256`
//! 2. **Logger Ownership** - only `src/main.rs` touches `tracing_subscriber`
//! 3. **Layering** - the engine and geometry never reach into the CLI
//! 4. **Panic Hygiene** - no `unwrap()`/`expect()` outside test modules

use std::fs;
use std::path::{Path, PathBuf};

/// Every `.rs` file under `dir`, sorted.
fn rust_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let mut pending = vec![dir.to_path_buf()];
    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir).expect("Failed to read source directory") {
            let path = entry.expect("Failed to read entry").path();
            if path.is_dir() {
                pending.push(path);
            } else if path.extension().is_some_and(|e| e == "rs") {
                files.push(path);
            }
        }
    }
    files.sort();
    files
}

/// Source lines before the first `#[cfg(test)]`, comments dropped.
fn production_lines(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content
        .lines()
        .enumerate()
        .take_while(|(_, line)| line.trim() != "#[cfg(test)]")
        .filter(|(_, line)| !line.trim_start().starts_with("//"))
        .map(|(i, line)| (i + 1, line))
}

fn display(path: &Path) -> String {
    path.strip_prefix(".").unwrap_or(path).display().to_string()
}

// =============================================================================
// Backend Isolation
// =============================================================================

#[test]
fn curve_backends_stay_behind_the_adapter() {
    let mut violations = Vec::new();

    for path in rust_files(Path::new("src")) {
        if path.starts_with("src/curve") {
            continue;
        }
        let content = fs::read_to_string(&path).unwrap();
        for (line_no, line) in production_lines(&content) {
            if line.contains("k256::") || line.contains("p256::") || line.contains("elliptic_curve::")
            {
                violations.push(format!("{}:{}: {}", display(&path), line_no, line.trim()));
            }
        }
    }

    assert!(
        violations.is_empty(),
        "Curve backends used outside src/curve:\n  {}",
        violations.join("\n  ")
    );
}

// =============================================================================
// Logger Ownership
// =============================================================================

#[test]
fn only_the_binary_installs_a_subscriber() {
    let mut violations = Vec::new();

    for path in rust_files(Path::new("src")) {
        if path == Path::new("src/main.rs") {
            continue;
        }
        let content = fs::read_to_string(&path).unwrap();
        if content.contains("tracing_subscriber") {
            violations.push(display(&path));
        }
    }

    assert!(
        violations.is_empty(),
        "Library modules must not configure logging:\n  {}",
        violations.join("\n  ")
    );
}

// =============================================================================
// Layering
// =============================================================================

#[test]
fn library_layers_do_not_depend_on_the_cli() {
    let mut violations = Vec::new();

    for layer in ["src/anchors", "src/core", "src/curve", "src/embed", "src/engine"] {
        for path in rust_files(Path::new(layer)) {
            let content = fs::read_to_string(&path).unwrap();
            for needle in ["crate::cli", "crate::ui", "anyhow::"] {
                if content.contains(needle) {
                    violations.push(format!("{}: uses {}", display(&path), needle));
                }
            }
        }
    }

    assert!(
        violations.is_empty(),
        "Layering violations found:\n  {}",
        violations.join("\n  ")
    );
}

// =============================================================================
// Panic Hygiene
// =============================================================================

#[test]
fn production_code_does_not_unwrap() {
    let mut violations = Vec::new();

    for path in rust_files(Path::new("src")) {
        let content = fs::read_to_string(&path).unwrap();
        for (line_no, line) in production_lines(&content) {
            if line.contains(".unwrap()") || line.contains(".expect(") {
                violations.push(format!("{}:{}: {}", display(&path), line_no, line.trim()));
            }
        }
    }

    assert!(
        violations.is_empty(),
        "unwrap()/expect() in production code:\n  {}",
        violations.join("\n  ")
    );
}
