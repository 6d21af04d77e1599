//! Configuration management for `NightSky`
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::NightSkyError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NightSkyConfig {
    /// Upstream feed configuration
    #[serde(default)]
    pub services: ServicesConfig,
    /// Preference store configuration
    #[serde(default)]
    pub store: StoreConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Upstream feed settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServicesConfig {
    /// Planetary K-index feed
    #[serde(default = "default_solar_url")]
    pub solar_url: String,
    /// Points endpoint prefix; `{lat},{lon}` is appended
    #[serde(default = "default_weather_url")]
    pub weather_url: String,
    /// Sent with every request; api.weather.gov rejects anonymous clients
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
}

/// Preference store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store directory location
    #[serde(default = "default_store_location")]
    pub location: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_solar_url() -> String {
    "https://services.swpc.noaa.gov/json/planetary_k_index_1m.json".to_string()
}

fn default_weather_url() -> String {
    "https://api.weather.gov/points/".to_string()
}

fn default_user_agent() -> String {
    format!("nightsky/{}", crate::VERSION)
}

fn default_timeout() -> u32 {
    30
}

fn default_store_location() -> String {
    dirs::data_dir()
        .map(|dir| dir.join("nightsky"))
        .unwrap_or_else(|| PathBuf::from(".nightsky"))
        .to_string_lossy()
        .into_owned()
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            solar_url: default_solar_url(),
            weather_url: default_weather_url(),
            user_agent: default_user_agent(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            location: default_store_location(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl NightSkyConfig {
    /// Load configuration from a file (default location when `None`) and environment variables
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // An explicit path must exist; the default location is optional
        let explicit = config_path.is_some();
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if explicit || config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(explicit)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment overrides, e.g. NIGHTSKY_SERVICES__TIMEOUT_SECONDS=10
        builder = builder.add_source(
            Environment::with_prefix("NIGHTSKY")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder.build().with_context(|| {
            format!("Failed to build configuration from {}", config_file.display())
        })?;

        let mut config: NightSkyConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("nightsky").join("config.toml"))
    }

    /// Apply default values to empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self.services.solar_url.is_empty() {
            self.services.solar_url = default_solar_url();
        }
        if self.services.weather_url.is_empty() {
            self.services.weather_url = default_weather_url();
        }
        if self.services.user_agent.is_empty() {
            self.services.user_agent = default_user_agent();
        }
        if self.services.timeout_seconds == 0 {
            self.services.timeout_seconds = default_timeout();
        }
        if self.store.location.is_empty() {
            self.store.location = default_store_location();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.services.timeout_seconds > 300 {
            return Err(
                NightSkyError::config("Service timeout cannot exceed 300 seconds").into(),
            );
        }
        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(NightSkyError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(NightSkyError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for (name, url) in [
            ("solar_url", &self.services.solar_url),
            ("weather_url", &self.services.weather_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(NightSkyError::config(format!(
                    "Service {name} must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}
