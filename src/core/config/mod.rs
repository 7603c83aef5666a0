//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! A single TOML file holds two sections:
//! - **`[anchors]`**: the [`AnchorConfig`] that fixes the anchor geometry
//! - **`[search]`**: the [`SearchConfig`] that tunes recovery
//!
//! Missing sections and keys take their defaults. Unknown keys are
//! rejected. No environment variables are consulted.
//!
//! # Example
//!
//! ```no_run
//! use clocklattice::core::config::EngineConfig;
//! use std::path::Path;
//!
//! let config = EngineConfig::load(Path::new("clk.toml")).unwrap();
//! println!("tau = {}", config.anchors.tolerance_tau);
//! ```

pub mod schema;

pub use schema::{AnchorConfig, EngineConfig, SearchConfig};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

impl EngineConfig {
    /// Load and validate a config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: EngineConfig =
            toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Load a config file if a path is given, otherwise use defaults.
    ///
    /// # Errors
    ///
    /// Same as [`EngineConfig::load`].
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Render as pretty TOML.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::InvalidValue(e.to_string()))
    }

    /// Write the config atomically.
    ///
    /// Creates parent directories if needed, writes to a temp file in the
    /// same directory, then renames it over the target.
    pub fn write(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                    path: path.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let contents = self.to_toml()?;

        let temp_path = path.with_extension("toml.tmp");
        let mut file = fs::File::create(&temp_path).map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        file.write_all(contents.as_bytes())
            .map_err(|e| ConfigError::WriteError {
                path: temp_path.clone(),
                source: e,
            })?;

        file.sync_all().map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        fs::rename(&temp_path, path).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_path_uses_defaults() {
        let config = EngineConfig::load_or_default(None).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("clk.toml");
        fs::write(
            &path,
            r#"
            [anchors]
            tolerance_tau = 0.0
            phase_offset_degrees = 30.0
            "#,
        )
        .unwrap();

        let config = EngineConfig::load(&path).unwrap();
        assert_eq!(config.anchors.tolerance_tau, 0.0);
        assert_eq!(config.anchors.phase_offset_degrees, 30.0);
        assert_eq!(config.search, SearchConfig::default());
    }

    #[test]
    fn load_missing_file_fails() {
        let temp = TempDir::new().unwrap();
        let err = EngineConfig::load(&temp.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }

    #[test]
    fn load_rejects_bad_toml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("clk.toml");
        fs::write(&path, "[anchors\n").unwrap();
        let err = EngineConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn load_rejects_invalid_values() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("clk.toml");
        fs::write(&path, "[anchors]\ncurve_bits = 7\n").unwrap();
        let err = EngineConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));
    }

    #[test]
    fn write_then_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/dir/clk.toml");
        let mut config = EngineConfig::default();
        config.search.scan_radius = 1024;
        config.write(&path).unwrap();

        assert!(!path.with_extension("toml.tmp").exists());
        let loaded = EngineConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }
}
