//! config
//!
//! Generator configuration: where metadata lives and where output goes.
//!
//! # Locations
//!
//! Configuration is read from `metagen.toml` in the working directory when
//! present; a missing file is not an error (defaults are used). An explicit
//! path overrides the search.
//!
//! # Defaults
//!
//! - `metadata_root`: `metadata`
//! - `output_root`: `..` (generation units nest their own root directory
//!   underneath)
//!
//! # Example
//!
//! ```
//! use metagen::config::GeneratorConfig;
//! use std::path::Path;
//!
//! let config = GeneratorConfig::default();
//! assert_eq!(config.metadata_root(), Path::new("metadata"));
//! assert_eq!(config.rules_root(), Path::new("metadata/Rules"));
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Errors from configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    Parse { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// On-disk configuration schema. All fields optional; absent fields take
/// the built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    metadata_root: Option<PathBuf>,
    output_root: Option<PathBuf>,
}

/// Resolved generator configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    metadata_root: PathBuf,
    output_root: PathBuf,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            metadata_root: PathBuf::from("metadata"),
            output_root: PathBuf::from(".."),
        }
    }
}

impl GeneratorConfig {
    /// Load configuration.
    ///
    /// With `path`, that file must exist and parse. Without it,
    /// `metagen.toml` is used when present, defaults otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read or
    /// parsed, or if a value fails validation.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let candidate = match path {
            Some(explicit) => Some(explicit.to_path_buf()),
            None => {
                let default = PathBuf::from("metagen.toml");
                default.exists().then_some(default)
            }
        };

        let file = match candidate {
            Some(path) => Self::read_file(&path)?,
            None => ConfigFile::default(),
        };

        let defaults = Self::default();
        let config = Self {
            metadata_root: file.metadata_root.unwrap_or(defaults.metadata_root),
            output_root: file.output_root.unwrap_or(defaults.output_root),
        };
        config.validate()?;
        Ok(config)
    }

    /// Build a configuration from explicit roots (tests, embedded drivers).
    pub fn with_roots(
        metadata_root: impl Into<PathBuf>,
        output_root: impl Into<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            metadata_root: metadata_root.into(),
            output_root: output_root.into(),
        };
        config.validate()?;
        Ok(config)
    }

    fn read_file(path: &Path) -> Result<ConfigFile, ConfigError> {
        let text = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&text).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.metadata_root.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue(
                "metadata_root cannot be empty".into(),
            ));
        }
        if self.output_root.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue(
                "output_root cannot be empty".into(),
            ));
        }
        Ok(())
    }

    /// Root directory of metadata sources.
    pub fn metadata_root(&self) -> &Path {
        &self.metadata_root
    }

    /// Directory of rule trees (`<metadata_root>/Rules`).
    pub fn rules_root(&self) -> PathBuf {
        self.metadata_root.join("Rules")
    }

    /// Base directory under which generation units create their output
    /// root directories.
    pub fn output_root(&self) -> &Path {
        &self.output_root
    }
}
