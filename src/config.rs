use std::time::Duration;

use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use mealgrid_plan::SaveWindows;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub save: SaveConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SaveConfig {
    /// Debounce window after assigning a recipe, in milliseconds.
    #[serde(default = "default_assign_debounce_ms")]
    pub assign_debounce_ms: u64,
    /// Debounce window after removing an assignment, in milliseconds.
    /// Removal persists faster than addition.
    #[serde(default = "default_remove_debounce_ms")]
    pub remove_debounce_ms: u64,
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self {
            assign_debounce_ms: default_assign_debounce_ms(),
            remove_debounce_ms: default_remove_debounce_ms(),
        }
    }
}

impl SaveConfig {
    pub fn windows(&self) -> SaveWindows {
        SaveWindows {
            assign: Duration::from_millis(self.assign_debounce_ms),
            remove: Duration::from_millis(self.remove_debounce_ms),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_assign_debounce_ms() -> u64 {
    2000
}

fn default_remove_debounce_ms() -> u64 {
    1000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from an optional TOML file, with `MEALGRID_*`
    /// environment variables layered on top.
    pub fn load(path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        if let Some(path) = path {
            builder = builder.add_source(File::with_name(&path));
        }

        builder
            .add_source(Environment::with_prefix("MEALGRID").separator("__"))
            .build()?
            .try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.save.assign_debounce_ms == 0 || self.save.remove_debounce_ms == 0 {
            return Err("save debounce windows must be non-zero".to_string());
        }

        if self.save.remove_debounce_ms > self.save.assign_debounce_ms {
            return Err(
                "remove debounce window must not exceed the assign window".to_string(),
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();

        assert_eq!(config.save.assign_debounce_ms, 2000);
        assert_eq!(config.save.remove_debounce_ms, 1000);
        assert_eq!(config.observability.log_level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_inverted_windows() {
        let config = Config {
            save: SaveConfig {
                assign_debounce_ms: 500,
                remove_debounce_ms: 1000,
            },
            ..Default::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_windows_convert_to_durations() {
        let windows = SaveConfig::default().windows();

        assert_eq!(windows.assign, Duration::from_secs(2));
        assert_eq!(windows.remove, Duration::from_secs(1));
    }
}
