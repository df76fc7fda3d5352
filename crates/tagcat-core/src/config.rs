use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::category::DEFAULT_SEPARATOR;
use crate::error::{Result, TagCatError};

const CONFIG_FILE: &str = "config.toml";

/// Default config template with rich comments
const DEFAULT_CONFIG_TEMPLATE: &str = r#"# tagcat configuration file
# Location: ~/.tagcat/config.toml

[categorize]
# Separator used to build prefix groups ("loss/train" -> group "loss")
# Default: "/"
separator = "/"

# Regex filter applied when none is given on the command line
# Default: "" (matches every tag)
# Example: default_filter = "loss|accuracy"
default_filter = ""
"#;

/// Global configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub categorize: CategorizeConfig,
}

/// Categorization settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorizeConfig {
    /// Prefix group separator
    #[serde(default = "default_separator")]
    pub separator: String,

    /// Filter used when the caller supplies none
    #[serde(default)]
    pub default_filter: String,
}

fn default_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}

impl Default for CategorizeConfig {
    fn default() -> Self {
        Self {
            separator: default_separator(),
            default_filter: String::new(),
        }
    }
}

impl Config {
    /// Load config from base directory
    pub fn load(base_dir: &Path) -> Result<Self> {
        let path = base_dir.join(CONFIG_FILE);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content).map_err(|e| TagCatError::ConfigParse {
            path: path.clone(),
            message: e.to_string(),
        })?;

        if config.categorize.separator.is_empty() {
            return Err(TagCatError::ConfigParse {
                path,
                message: "categorize.separator must not be empty".to_string(),
            });
        }

        Ok(config)
    }

    /// Save config to base directory
    pub fn save(&self, base_dir: &Path) -> Result<()> {
        let path = base_dir.join(CONFIG_FILE);
        fs::create_dir_all(base_dir)?;

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Get config file path
    pub fn path(base_dir: &Path) -> PathBuf {
        base_dir.join(CONFIG_FILE)
    }

    /// Initialize config with default template (rich comments)
    pub fn init(base_dir: &Path) -> Result<PathBuf> {
        let path = base_dir.join(CONFIG_FILE);
        fs::create_dir_all(base_dir)?;

        if !path.exists() {
            fs::write(&path, DEFAULT_CONFIG_TEMPLATE)?;
        }

        Ok(path)
    }

    /// Get a config value by dot-notation key
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "categorize.separator" => Some(self.categorize.separator.clone()),
            "categorize.default_filter" => Some(self.categorize.default_filter.clone()),
            _ => None,
        }
    }

    /// Set a config value by dot-notation key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "categorize.separator" => {
                if value.is_empty() {
                    return Err(TagCatError::InvalidConfigValue {
                        key: key.to_string(),
                        message: "separator must not be empty".to_string(),
                    });
                }
                self.categorize.separator = value.to_string();
                Ok(())
            }
            "categorize.default_filter" => {
                self.categorize.default_filter = value.to_string();
                Ok(())
            }
            _ => Err(TagCatError::ConfigKeyNotFound {
                key: key.to_string(),
            }),
        }
    }

    /// List all config keys with their current values
    pub fn list(&self) -> Vec<(String, String)> {
        vec![
            (
                "categorize.separator".to_string(),
                format!("{:?}", self.categorize.separator),
            ),
            (
                "categorize.default_filter".to_string(),
                format!("{:?}", self.categorize.default_filter),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_returns_default() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.categorize.separator, "/");
    }

    #[test]
    fn test_init_template_parses_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = Config::init(dir.path()).unwrap();
        assert!(path.exists());

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.set("categorize.separator", "::").unwrap();
        config.set("categorize.default_filter", "loss").unwrap();
        config.save(dir.path()).unwrap();

        let loaded = Config::load(dir.path()).unwrap();
        assert_eq!(loaded.categorize.separator, "::");
        assert_eq!(loaded.categorize.default_filter, "loss");
    }

    #[test]
    fn test_config_get_set() {
        let mut config = Config::default();
        config.set("categorize.default_filter", "acc").unwrap();
        assert_eq!(
            config.get("categorize.default_filter").as_deref(),
            Some("acc")
        );
        assert!(config.get("categorize.unknown").is_none());
    }

    #[test]
    fn test_set_rejects_empty_separator() {
        let mut config = Config::default();
        let err = config.set("categorize.separator", "").unwrap_err();
        assert!(matches!(err, TagCatError::InvalidConfigValue { .. }));
        assert_eq!(config.categorize.separator, "/");
    }

    #[test]
    fn test_set_unknown_key() {
        let mut config = Config::default();
        assert!(matches!(
            config.set("profile.exclude", ".git"),
            Err(TagCatError::ConfigKeyNotFound { .. })
        ));
    }

    #[test]
    fn test_load_rejects_empty_separator_in_file() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "[categorize]\nseparator = \"\"\n",
        )
        .unwrap();
        assert!(matches!(
            Config::load(dir.path()),
            Err(TagCatError::ConfigParse { .. })
        ));
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "[categorize]\ndefault_filter = \"loss\"\n",
        )
        .unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.categorize.separator, "/");
        assert_eq!(config.categorize.default_filter, "loss");
    }
}
