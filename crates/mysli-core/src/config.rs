use std::fs;
use std::path::{Path, PathBuf};

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::category::{CategoriesConfig, DEFAULT_CONFIDENCE_DIVISOR};
use crate::error::{MysliError, Result};

const CONFIG_FILE: &str = "config.toml";
const BASE_DIR_NAME: &str = ".mysli";
const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Default config template with rich comments
const DEFAULT_CONFIG_TEMPLATE: &str = r#"# mysli configuration file
# Location: ~/.mysli/config.toml

[categorizer]
# Score that maps to confidence 1.0
# Default: 15.0
confidence_divisor = 15.0

[display]
# strftime format for timestamps older than a week
# Default: "%Y-%m-%d %H:%M"
date_format = "%Y-%m-%d %H:%M"

# Show "5 min ago" style timestamps for recent notes
# Default: true
relative_dates = true

# Extend or override categories. Keywords are lower-cased on load.
# Unknown names add a new category (an icon is required).
#
# [categories.zakupy]
# keywords = ["rossmann", "pepco"]
#
# [categories."podróże"]
# icon = "✈️"
# description = "Trips and travel plans"
# keywords = ["lot", "hotel", "bilet"]
# patterns = ['\b[A-Z]{3}\s*->\s*[A-Z]{3}\b']
"#;

/// Global configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub categorizer: CategorizerConfig,

    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default, skip_serializing_if = "CategoriesConfig::is_empty")]
    pub categories: CategoriesConfig,
}

/// Scoring tunables
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategorizerConfig {
    #[serde(default = "default_confidence_divisor")]
    pub confidence_divisor: f64,
}

/// Note list rendering
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayConfig {
    #[serde(default = "default_date_format")]
    pub date_format: String,

    #[serde(default = "default_relative_dates")]
    pub relative_dates: bool,
}

fn default_confidence_divisor() -> f64 {
    DEFAULT_CONFIDENCE_DIVISOR
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_relative_dates() -> bool {
    true
}

impl Default for CategorizerConfig {
    fn default() -> Self {
        Self {
            confidence_divisor: default_confidence_divisor(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
            relative_dates: default_relative_dates(),
        }
    }
}

impl Config {
    /// `~/.mysli`
    pub fn default_base_dir() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|h| h.join(BASE_DIR_NAME))
            .ok_or(MysliError::HomeNotFound)
    }

    /// Load config from base directory
    pub fn load(base_dir: &Path) -> Result<Self> {
        let path = base_dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content).map_err(|e| MysliError::ConfigParse {
            path: path.clone(),
            message: e.to_string(),
        })?;

        validate_divisor(config.categorizer.confidence_divisor)?;
        validate_date_format(&config.display.date_format)?;

        debug!(path = %path.display(), "loaded config");
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
            "categorizer.confidence_divisor" => {
                Some(self.categorizer.confidence_divisor.to_string())
            }
            "display.date_format" => Some(self.display.date_format.clone()),
            "display.relative_dates" => Some(self.display.relative_dates.to_string()),
            _ => None,
        }
    }

    /// Set a config value by dot-notation key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "categorizer.confidence_divisor" => {
                let divisor: f64 =
                    value
                        .trim()
                        .parse()
                        .map_err(|_| MysliError::InvalidConfigValue {
                            key: key.to_string(),
                            message: format!("'{}' is not a number", value),
                        })?;
                validate_divisor(divisor)?;
                self.categorizer.confidence_divisor = divisor;
                Ok(())
            }
            "display.date_format" => {
                validate_date_format(value)?;
                self.display.date_format = value.to_string();
                Ok(())
            }
            "display.relative_dates" => {
                self.display.relative_dates =
                    value
                        .trim()
                        .parse()
                        .map_err(|_| MysliError::InvalidConfigValue {
                            key: key.to_string(),
                            message: format!("'{}' is not true or false", value),
                        })?;
                Ok(())
            }
            _ => Err(MysliError::ConfigKeyNotFound {
                key: key.to_string(),
            }),
        }
    }

    /// List all config keys with their current values
    pub fn list(&self) -> Vec<(String, String)> {
        [
            "categorizer.confidence_divisor",
            "display.date_format",
            "display.relative_dates",
        ]
        .iter()
        .filter_map(|key| self.get(key).map(|value| (key.to_string(), value)))
        .collect()
    }

    /// Persist an extra keyword for `category`
    ///
    /// The keyword is lower-cased, as the categorizer expects.
    pub fn add_keyword(&mut self, category: &str, keyword: &str) {
        self.categories
            .categories
            .entry(category.to_string())
            .or_default()
            .keywords
            .push(keyword.to_lowercase());
    }
}

fn validate_divisor(divisor: f64) -> Result<()> {
    if divisor.is_finite() && divisor > 0.0 {
        Ok(())
    } else {
        Err(MysliError::InvalidConfigValue {
            key: "categorizer.confidence_divisor".to_string(),
            message: format!("must be a positive number, got {}", divisor),
        })
    }
}

fn validate_date_format(format: &str) -> Result<()> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(MysliError::InvalidConfigValue {
            key: "display.date_format".to_string(),
            message: format!("'{}' is not a valid strftime format", format),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.categorizer.confidence_divisor, 15.0);
        assert_eq!(config.display.date_format, "%Y-%m-%d %H:%M");
        assert!(config.display.relative_dates);
        assert!(config.categories.is_empty());
    }

    #[test]
    fn test_config_get_set() {
        let mut config = Config::default();

        config.set("categorizer.confidence_divisor", "20").unwrap();
        assert_eq!(config.categorizer.confidence_divisor, 20.0);
        assert_eq!(config.get("categorizer.confidence_divisor").unwrap(), "20");

        config.set("display.relative_dates", "false").unwrap();
        assert!(!config.display.relative_dates);

        config.set("display.date_format", "%d.%m.%Y").unwrap();
        assert_eq!(config.get("display.date_format").unwrap(), "%d.%m.%Y");
    }

    #[test]
    fn test_config_set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(matches!(
            config.set("categorizer.confidence_divisor", "0"),
            Err(MysliError::InvalidConfigValue { .. })
        ));
        assert!(matches!(
            config.set("categorizer.confidence_divisor", "abc"),
            Err(MysliError::InvalidConfigValue { .. })
        ));
        assert!(matches!(
            config.set("display.relative_dates", "maybe"),
            Err(MysliError::InvalidConfigValue { .. })
        ));
        assert!(matches!(
            config.set("display.date_format", "%Q"),
            Err(MysliError::InvalidConfigValue { .. })
        ));
        assert!(matches!(
            config.set("unknown.key", "1"),
            Err(MysliError::ConfigKeyNotFound { .. })
        ));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_list() {
        let keys: Vec<String> = Config::default().list().into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec![
                "categorizer.confidence_divisor",
                "display.date_format",
                "display.relative_dates"
            ]
        );
    }

    #[test]
    fn test_load_missing_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = Config::load(tmp.path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.set("categorizer.confidence_divisor", "12.5").unwrap();
        config.add_keyword("zakupy", "Rossmann");
        config.save(tmp.path()).unwrap();

        let loaded = Config::load(tmp.path()).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(
            loaded.categories.categories["zakupy"].keywords,
            vec!["rossmann"]
        );
    }

    #[test]
    fn test_init_writes_parseable_template() {
        let tmp = TempDir::new().unwrap();
        let path = Config::init(tmp.path()).unwrap();
        assert!(path.exists());
        assert_eq!(Config::load(tmp.path()).unwrap(), Config::default());
    }

    #[test]
    fn test_load_parses_category_overrides() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            r#"
[categories."podróże"]
icon = "✈️"
keywords = ["Lot", "hotel"]
"#,
        )
        .unwrap();

        let config = Config::load(tmp.path()).unwrap();
        let entry = &config.categories.categories["podróże"];
        assert_eq!(entry.icon.as_deref(), Some("✈️"));
        assert_eq!(entry.keywords, vec!["Lot", "hotel"]);
    }

    #[test]
    fn test_load_rejects_invalid_divisor() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            "[categorizer]\nconfidence_divisor = -1.0\n",
        )
        .unwrap();
        assert!(matches!(
            Config::load(tmp.path()),
            Err(MysliError::InvalidConfigValue { .. })
        ));
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "[categorizer\n").unwrap();
        assert!(matches!(
            Config::load(tmp.path()),
            Err(MysliError::ConfigParse { .. })
        ));
    }
}
