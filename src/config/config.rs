use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub behavior: BehaviorConfig,
    pub keybindings: KeybindingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Show row numbers in the table view
    pub show_row_numbers: bool,

    /// Color the Status column by badge severity
    pub badge_colors: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Quiescence window for the live search box, in milliseconds
    pub debounce_ms: u64,

    /// Quantities at or below this count as low stock
    pub low_stock_threshold: i64,

    /// Days before expiry at which an item counts as expiring
    pub expiry_warning_days: i64,

    /// Filename used by export when none is given
    pub default_export_filename: String,

    /// How long notification banners stay up, in milliseconds
    pub notification_ttl_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeybindingConfig {
    /// Custom key mappings, action name -> key sequence
    /// e.g. "focus_search" = "ctrl+s"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_mappings: Option<std::collections::HashMap<String, String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            display: DisplayConfig::default(),
            behavior: BehaviorConfig::default(),
            keybindings: KeybindingConfig::default(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_row_numbers: false,
            badge_colors: true,
        }
    }
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            low_stock_threshold: 2,
            expiry_warning_days: 3,
            default_export_filename: "inventory.csv".to_string(),
            notification_ttl_ms: 5000,
        }
    }
}

impl Default for KeybindingConfig {
    fn default() -> Self {
        Self {
            custom_mappings: None,
        }
    }
}

impl Config {
    /// Load config from the default location, writing a default file on
    /// first run
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            let default_config = Self::default();
            default_config.save()?;
            return Ok(default_config);
        }

        let contents = fs::read_to_string(&config_path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Get the default config file path
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("inventory-tui").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_round_trip_through_toml() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.behavior.debounce_ms, 300);
        assert_eq!(parsed.behavior.default_export_filename, "inventory.csv");
        assert_eq!(parsed.behavior.notification_ttl_ms, 5000);
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let parsed: Config = toml::from_str("[behavior]\ndebounce_ms = 150\n").unwrap();
        assert_eq!(parsed.behavior.debounce_ms, 150);
        assert_eq!(parsed.behavior.low_stock_threshold, 2);
        assert!(parsed.display.badge_colors);
    }
}
