//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Global Config
//!
//! Located at (in order of precedence):
//! 1. `$UNITCLOSURE_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/unitclosure/config.toml`
//! 3. `~/.unitclosure/config.toml`
//!
//! # Directory Config
//!
//! Located at `<unit directory>/unitclosure.toml`.
//!
//! Both scopes share one schema; directory values override global ones.
//!
//! # Validation
//!
//! Config values are validated after parsing (e.g., the extension must be a
//! valid [`UnitExtension`]).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::types::UnitExtension;

/// Loader configuration for one scope.
///
/// # Example
///
/// ```toml
/// include_framework = false
/// extension = "unit"
/// probe_paths = ["/opt/shared/units"]
///
/// [framework]
/// prefixes = ["Vendor."]
/// names = ["runtime"]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LoaderConfig {
    /// Load and walk framework units too
    pub include_framework: Option<bool>,

    /// Extension of unit files
    pub extension: Option<String>,

    /// Extra directories searched when resolving references
    pub probe_paths: Option<Vec<PathBuf>>,

    /// Extra framework classification rules
    pub framework: Option<FrameworkRules>,
}

impl LoaderConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ext) = &self.extension {
            UnitExtension::new(ext.as_str())
                .map_err(|e| ConfigError::InvalidValue(e.to_string()))?;
        }

        if let Some(paths) = &self.probe_paths {
            if paths.iter().any(|p| p.as_os_str().is_empty()) {
                return Err(ConfigError::InvalidValue(
                    "probe path cannot be empty".to_string(),
                ));
            }
        }

        if let Some(framework) = &self.framework {
            framework.validate()?;
        }

        Ok(())
    }
}

/// Extra framework classification rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FrameworkRules {
    /// Case-insensitive identity prefixes
    pub prefixes: Vec<String>,

    /// Exact simple names
    pub names: Vec<String>,
}

impl FrameworkRules {
    /// Validate the rules.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.prefixes.iter().any(|p| p.is_empty()) {
            return Err(ConfigError::InvalidValue(
                "framework prefix cannot be empty".to_string(),
            ));
        }
        if self.names.iter().any(|n| n.is_empty()) {
            return Err(ConfigError::InvalidValue(
                "framework name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod loader_config {
        use super::*;

        #[test]
        fn defaults() {
            let config = LoaderConfig::default();
            assert!(config.include_framework.is_none());
            assert!(config.extension.is_none());
            assert!(config.probe_paths.is_none());
            assert!(config.validate().is_ok());
        }

        #[test]
        fn valid_extension() {
            let config = LoaderConfig {
                extension: Some("dll".to_string()),
                ..Default::default()
            };
            assert!(config.validate().is_ok());
        }

        #[test]
        fn invalid_extension() {
            let config = LoaderConfig {
                extension: Some(".dll".to_string()),
                ..Default::default()
            };
            assert!(config.validate().is_err());
        }

        #[test]
        fn empty_probe_path_rejected() {
            let config = LoaderConfig {
                probe_paths: Some(vec![PathBuf::new()]),
                ..Default::default()
            };
            assert!(config.validate().is_err());
        }

        #[test]
        fn parse_full() {
            let config: LoaderConfig = toml::from_str(
                r#"
                include_framework = true
                extension = "mod"
                probe_paths = ["/opt/units"]

                [framework]
                prefixes = ["Vendor."]
                "#,
            )
            .unwrap();

            assert_eq!(config.include_framework, Some(true));
            assert_eq!(config.extension.as_deref(), Some("mod"));
            assert_eq!(config.probe_paths, Some(vec![PathBuf::from("/opt/units")]));
            let framework = config.framework.unwrap();
            assert_eq!(framework.prefixes, vec!["Vendor.".to_string()]);
            assert!(framework.names.is_empty());
        }

        #[test]
        fn reject_unknown_fields() {
            let toml = r#"
                extension = "unit"
                recursive = true
            "#;

            let result: Result<LoaderConfig, _> = toml::from_str(toml);
            assert!(result.is_err());
        }
    }

    mod framework_rules {
        use super::*;

        #[test]
        fn empty_prefix_rejected() {
            let rules = FrameworkRules {
                prefixes: vec!["".to_string()],
                names: vec![],
            };
            assert!(rules.validate().is_err());
        }

        #[test]
        fn empty_name_rejected() {
            let rules = FrameworkRules {
                prefixes: vec![],
                names: vec!["".to_string()],
            };
            assert!(rules.validate().is_err());
        }
    }
}
