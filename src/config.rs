//! Configuration management for the Aetheria dashboard
//!
//! Handles loading configuration from a TOML file with sensible defaults
//! and provides validation for all configuration settings.

use crate::AetheriaError;
use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Root configuration structure for the Aetheria dashboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AetheriaConfig {
    /// External API configuration
    #[serde(default)]
    pub api: ApiConfig,
    /// Refresh and interaction timing
    #[serde(default)]
    pub refresh: RefreshConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Preference storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
    /// Default application settings
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// External API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL for the weather forecast API
    #[serde(default = "default_weather_base_url")]
    pub weather_base_url: String,
    /// Base URL for the air quality API
    #[serde(default = "default_air_quality_base_url")]
    pub air_quality_base_url: String,
    /// Base URL for forward/reverse geocoding
    #[serde(default = "default_geocoding_base_url")]
    pub geocoding_base_url: String,
    /// Client identifier sent with every geocoding request; the provider
    /// rate-limits anonymous traffic
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Maximum number of search candidates to request
    #[serde(default = "default_max_candidates")]
    pub max_candidates: u32,
}

/// Refresh and interaction timing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshConfig {
    /// Background refresh period in seconds while a location is selected
    #[serde(default = "default_refresh_interval")]
    pub interval_seconds: u64,
    /// Forecast horizon in days
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u32,
    /// Quiescence window for the search box in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub search_debounce_ms: u64,
    /// Timeout for a one-shot device position fix in seconds
    #[serde(default = "default_geolocation_timeout")]
    pub geolocation_timeout_seconds: u64,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Preference storage settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Override for the preference file location; platform default when unset
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Default application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Display language used before any preference is stored (fr, en or es)
    #[serde(default = "default_language")]
    pub language: String,
}

// Default value functions
fn default_weather_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_air_quality_base_url() -> String {
    "https://air-quality-api.open-meteo.com/v1".to_string()
}

fn default_geocoding_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_user_agent() -> String {
    "Aetheria Weather Dashboard/0.1.0".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_max_candidates() -> u32 {
    10
}

fn default_refresh_interval() -> u64 {
    300
}

fn default_forecast_days() -> u32 {
    7
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_geolocation_timeout() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_language() -> String {
    "fr".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            weather_base_url: default_weather_base_url(),
            air_quality_base_url: default_air_quality_base_url(),
            geocoding_base_url: default_geocoding_base_url(),
            user_agent: default_user_agent(),
            timeout_seconds: default_timeout(),
            max_candidates: default_max_candidates(),
        }
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_seconds: default_refresh_interval(),
            forecast_days: default_forecast_days(),
            search_debounce_ms: default_debounce_ms(),
            geolocation_timeout_seconds: default_geolocation_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
        }
    }
}

impl AetheriaConfig {
    /// Load configuration from the given file, or from the platform config
    /// directory when `path` is `None`. A missing file yields the defaults.
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        let path = match path {
            Some(p) => p.clone(),
            None => Self::config_file_path()?,
        };

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: AetheriaConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        cfg.validate()?;
        Ok(cfg)
    }

    /// Path to the default config file
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "aetheria", "aetheria")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.api.timeout_seconds == 0 {
            return Err(AetheriaError::config("api.timeout_seconds must be positive").into());
        }
        if self.api.max_candidates == 0 {
            return Err(AetheriaError::config("api.max_candidates must be positive").into());
        }
        if self.refresh.forecast_days == 0 || self.refresh.forecast_days > 16 {
            return Err(
                AetheriaError::config("refresh.forecast_days must be between 1 and 16").into(),
            );
        }
        if self.refresh.interval_seconds < 60 {
            return Err(
                AetheriaError::config("refresh.interval_seconds must be at least 60").into(),
            );
        }
        if self.refresh.search_debounce_ms == 0 {
            return Err(AetheriaError::config("refresh.search_debounce_ms must be positive").into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let cfg = AetheriaConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.refresh.interval_seconds, 300);
        assert_eq!(cfg.refresh.forecast_days, 7);
        assert_eq!(cfg.refresh.search_debounce_ms, 300);
        assert_eq!(cfg.refresh.geolocation_timeout_seconds, 10);
        assert_eq!(cfg.defaults.language, "fr");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let cfg: AetheriaConfig = toml::from_str(
            r#"
            [refresh]
            forecast_days = 5
            "#,
        )
        .unwrap();

        assert_eq!(cfg.refresh.forecast_days, 5);
        assert_eq!(cfg.refresh.interval_seconds, 300);
        assert!(cfg.api.weather_base_url.contains("open-meteo"));
    }

    #[test]
    fn test_invalid_forecast_days_rejected() {
        let cfg: AetheriaConfig = toml::from_str(
            r#"
            [refresh]
            forecast_days = 0
            "#,
        )
        .unwrap();

        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let path = PathBuf::from("/nonexistent/aetheria-config.toml");
        let cfg = AetheriaConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.refresh.interval_seconds, 300);
    }
}
