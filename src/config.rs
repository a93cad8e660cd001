//! Configuration for the migration tooling
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (docket.toml)
//! - Environment variables (DOCKET_*)
//!
//! ## Example config file (docket.toml):
//! ```toml
//! [input]
//! format = "auto"
//!
//! [output]
//! format = "pretty"
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Main configuration for the migration tooling
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MigrateConfig {
    /// Input parsing settings
    #[serde(default)]
    pub input: InputConfig,

    /// Output rendering settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// Input parsing configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct InputConfig {
    /// Document format expected from input files
    #[serde(default)]
    pub format: InputFormat,
}

/// Input document format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// Try JSON first, fall back to YAML
    #[default]
    Auto,
    Json,
    Yaml,
}

/// Output rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    /// Output format (pretty or compact)
    #[serde(default)]
    pub format: OutputFormat,
}

/// Output format for JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pretty,
    Compact,
}

impl MigrateConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration from a specific file
    pub fn load_from(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        // Load from default locations
        let config_locations = ["docket.toml", ".docket.toml", "config/docket.toml"];
        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        // Load from XDG config directory
        if let Some(config_dir) = directories::ProjectDirs::from("dev", "docket", "schemas") {
            let xdg_config = config_dir.config_dir().join("docket.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        // Load from specified path
        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // Load from environment variables (DOCKET_*)
        builder = builder.add_source(
            Environment::with_prefix("DOCKET")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MigrateConfig::default();
        assert_eq!(config.input.format, InputFormat::Auto);
        assert_eq!(config.output.format, OutputFormat::Pretty);
    }

    #[test]
    fn test_serialize_config() {
        let config = MigrateConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[input]"));
        assert!(toml_str.contains("[output]"));
        assert!(toml_str.contains("format = \"pretty\""));
    }

    #[test]
    fn test_save_writes_readable_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docket.toml");

        let config = MigrateConfig::default();
        config.save(path.to_str().unwrap()).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("format = \"auto\""));
    }
}
