//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! unitclosure has two configuration scopes:
//! - **Global**: User-level settings
//! - **Directory**: Settings stored next to the units being loaded
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Directory config file
//! 4. CLI flags (not handled here)
//!
//! Probe paths and framework rules are additive: directory entries come
//! first, then global ones. A relative probe path is relative to the config
//! file that names it.
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$UNITCLOSURE_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/unitclosure/config.toml`
//! 3. `~/.unitclosure/config.toml`
//!
//! # Directory Config Location
//!
//! `<unit directory>/unitclosure.toml`
//!
//! # Example
//!
//! ```no_run
//! use unitclosure::core::config::Config;
//! use std::path::Path;
//!
//! let result = Config::load(Some(Path::new("/opt/app"))).unwrap();
//! let config = result.config;
//!
//! println!("Extension: {}", config.extension());
//! println!("Include framework: {}", config.include_framework());
//! ```

pub mod schema;

pub use schema::{FrameworkRules, LoaderConfig};

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::eligibility::FrameworkFilter;
use crate::core::types::UnitExtension;

/// File name of the directory-scoped config.
pub const DIRECTORY_CONFIG_FILE: &str = "unitclosure.toml";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}'")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Warnings generated during config loading.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    /// The warning message.
    pub message: String,
    /// The path that triggered the warning.
    pub path: PathBuf,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Any warnings generated during loading.
    pub warnings: Vec<ConfigWarning>,
}

/// Merged configuration from all sources.
///
/// Accessor methods apply precedence rules automatically.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: LoaderConfig,
    /// Directory configuration (if present)
    pub directory: Option<LoaderConfig>,
    global_path: Option<PathBuf>,
    directory_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// If `unit_dir` is provided, also loads `<unit_dir>/unitclosure.toml`.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be parsed or contain
    /// invalid values. Missing config files are not an error.
    pub fn load(unit_dir: Option<&Path>) -> Result<ConfigLoadResult, ConfigError> {
        let global_path = Self::find_global();
        Self::load_from(global_path.as_deref(), unit_dir)
    }

    /// Load configuration from an explicit global config path.
    pub fn load_from(
        global_path: Option<&Path>,
        unit_dir: Option<&Path>,
    ) -> Result<ConfigLoadResult, ConfigError> {
        let mut warnings = Vec::new();

        let (global, global_path) = match global_path {
            Some(path) if path.exists() => (Self::read_config(path)?, Some(path.to_path_buf())),
            _ => (LoaderConfig::default(), None),
        };

        let (directory, directory_path) = match unit_dir {
            Some(dir) => {
                let path = dir.join(DIRECTORY_CONFIG_FILE);
                if path.exists() {
                    (Some(Self::read_config(&path)?), Some(path))
                } else {
                    (None, None)
                }
            }
            None => (None, None),
        };

        global.validate()?;
        if let Some(ref d) = directory {
            d.validate()?;
        }

        let config = Config {
            global,
            directory,
            global_path,
            directory_path,
        };

        for probe in config.probe_paths() {
            if !probe.is_dir() {
                warnings.push(ConfigWarning {
                    message: format!("probe path '{}' is not a directory", probe.display()),
                    path: config
                        .directory_path
                        .clone()
                        .or_else(|| config.global_path.clone())
                        .unwrap_or_default(),
                });
            }
        }

        Ok(ConfigLoadResult { config, warnings })
    }

    /// Locate the global config file.
    fn find_global() -> Option<PathBuf> {
        // 1. Check $UNITCLOSURE_CONFIG
        if let Ok(path) = std::env::var("UNITCLOSURE_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        // 2. Check $XDG_CONFIG_HOME/unitclosure/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("unitclosure/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        // 3. Check ~/.unitclosure/config.toml
        dirs::home_dir()
            .map(|home| home.join(".unitclosure/config.toml"))
            .filter(|path| path.exists())
    }

    /// Read and parse a config file.
    ///
    /// Relative probe paths are resolved against the file's directory.
    fn read_config(path: &Path) -> Result<LoaderConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut config: LoaderConfig =
            toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        if let (Some(base), Some(probes)) = (path.parent(), config.probe_paths.as_mut()) {
            let relative = probes
                .iter_mut()
                .filter(|p| p.is_relative() && !p.as_os_str().is_empty());
            for probe in relative {
                *probe = base.join(&*probe);
            }
        }
        Ok(config)
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// Check if framework units are loaded too.
    ///
    /// Defaults to `false` if not configured.
    pub fn include_framework(&self) -> bool {
        self.directory
            .as_ref()
            .and_then(|d| d.include_framework)
            .or(self.global.include_framework)
            .unwrap_or(false)
    }

    /// Get the unit file extension.
    ///
    /// Defaults to `unit` if not configured.
    pub fn extension(&self) -> UnitExtension {
        self.directory
            .as_ref()
            .and_then(|d| d.extension.as_deref())
            .or(self.global.extension.as_deref())
            .and_then(|ext| UnitExtension::new(ext).ok())
            .unwrap_or_default()
    }

    /// Extra probe paths, directory entries first.
    pub fn probe_paths(&self) -> Vec<PathBuf> {
        self.scopes()
            .filter_map(|c| c.probe_paths.as_ref())
            .flatten()
            .cloned()
            .collect()
    }

    /// Framework classification rules: defaults plus configured extras.
    pub fn framework_filter(&self) -> FrameworkFilter {
        let rules: Vec<&FrameworkRules> =
            self.scopes().filter_map(|c| c.framework.as_ref()).collect();
        FrameworkFilter::with_extra(
            rules.iter().flat_map(|r| r.prefixes.iter().cloned()),
            rules.iter().flat_map(|r| r.names.iter().cloned()),
        )
    }

    /// Get the path to the loaded global config file.
    pub fn global_config_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Get the path to the loaded directory config file.
    pub fn directory_config_loaded_from(&self) -> Option<&Path> {
        self.directory_path.as_deref()
    }

    /// Scopes in precedence order, most specific first.
    fn scopes(&self) -> impl Iterator<Item = &LoaderConfig> {
        self.directory.iter().chain(std::iter::once(&self.global))
    }
}
