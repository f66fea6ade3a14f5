//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, Result, ResultExt};
use std::path::Path;

/// Configuration wrapper
#[derive(Debug, Clone)]
pub struct Config {
    /// Parsed configuration values
    pub schema: ConfigSchema,
    /// Path the configuration was loaded from, if any
    pub path: Option<String>,
}

impl Config {
    /// Load configuration from a file path or use defaults
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config_path = path.map(String::from).or_else(find_config_file);

        let schema = if let Some(ref p) = config_path {
            load_config_file(p)?
        } else {
            ConfigSchema::default()
        };

        Ok(Self {
            schema,
            path: config_path,
        })
    }

    /// Load with defaults only (no file)
    pub fn default() -> Self {
        Self {
            schema: ConfigSchema::default(),
            path: None,
        }
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<String> {
    let candidates = [
        ".carrot-tools.toml",
        "carrot-tools.toml",
        ".config/carrot-tools.toml",
    ];

    for candidate in candidates {
        if Path::new(candidate).exists() {
            return Some(candidate.to_string());
        }
    }

    None
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &str) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::config(format!("Failed to read config file {}: {}", path, e)))?;

    toml::from_str(&content)
        .map_err(Error::from)
        .context(format!("While parsing {}", path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.path.is_none());
        assert_eq!(config.schema.resources.properties_file, "local.properties");
        assert_eq!(config.schema.app.namespace, "com.example.carrot");
        assert!(config.schema.sdk.compile_sdk.is_none());
    }

    #[test]
    fn test_config_load_missing_file() {
        let config = Config::load(None);
        assert!(config.is_ok());
    }

    #[test]
    fn test_config_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("carrot-tools.toml");
        std::fs::write(
            &path,
            "[sdk]\ncompile_sdk = 35\nversion_name = \"1.0.0\"\n\n[resources]\nres_dir = \"app/res\"\n",
        )
        .unwrap();

        let config = Config::load(path.to_str()).unwrap();
        assert_eq!(config.schema.sdk.compile_sdk, Some(35));
        assert_eq!(config.schema.sdk.version_name.as_deref(), Some("1.0.0"));
        assert_eq!(config.schema.resources.res_dir, "app/res");
        // Unset sections fall back to defaults
        assert_eq!(config.schema.resources.properties_file, "local.properties");
    }

    #[test]
    fn test_config_load_rejects_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("carrot-tools.toml");
        std::fs::write(&path, "[sdk\ncompile_sdk = 35\n").unwrap();

        assert!(Config::load(path.to_str()).is_err());
    }
}
