//! Configuration management for the `WeatherWise` backend
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::WeatherWiseError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable honoured when `places.api_key` is not set
pub const PLACES_API_KEY_ENV: &str = "PLACES_API_KEY";

/// Root configuration structure for the `WeatherWise` backend
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct WeatherWiseConfig {
    /// Google Places / Geocoding / Timezone settings
    pub places: PlacesConfig,
    /// Weather API configuration
    pub weather: WeatherConfig,
    /// Outbound HTTP client settings
    pub http: HttpConfig,
    /// HTTP server settings
    pub server: ServerConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Google Maps platform settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacesConfig {
    /// Maps platform API key (required to serve requests)
    pub api_key: Option<String>,
    /// Base URL shared by the Places, Geocoding and Timezone APIs
    pub base_url: String,
    /// Nearby search radius in metres
    pub search_radius_m: u32,
    /// Maximum number of candidate places kept per search
    pub max_results: usize,
}

/// Weather API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// Base URL for the Open-Meteo API
    pub base_url: String,
}

/// Outbound HTTP settings shared by every provider
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout_seconds: u32,
    /// Maximum number of retries for transient failures
    pub max_retries: u32,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Per-request timeout in seconds
    pub request_timeout_seconds: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (pretty or json)
    pub format: String,
}

// Default value functions
fn default_places_base_url() -> String {
    "https://maps.googleapis.com/maps/api".to_string()
}

fn default_search_radius() -> u32 {
    5000
}

fn default_max_results() -> usize {
    60
}

fn default_weather_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_http_timeout() -> u32 {
    30
}

fn default_http_max_retries() -> u32 {
    3
}

fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    3000
}

fn default_request_timeout() -> u32 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_places_base_url(),
            search_radius_m: default_search_radius(),
            max_results: default_max_results(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_http_timeout(),
            max_retries: default_http_max_retries(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            request_timeout_seconds: default_request_timeout(),
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

impl WeatherWiseConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path()
                .filter(|path| path.exists())
                .unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // WEATHERWISE_PLACES__API_KEY -> places.api_key
        builder = builder.add_source(
            Environment::with_prefix("WEATHERWISE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: WeatherWiseConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        if config.places.api_key.is_none() {
            config.places.api_key = std::env::var(PLACES_API_KEY_ENV).ok();
        }

        // Apply defaults for missing values
        config.apply_defaults();

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("weatherwise").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.places.base_url.is_empty() {
            self.places.base_url = default_places_base_url();
        }
        if self.places.search_radius_m == 0 {
            self.places.search_radius_m = default_search_radius();
        }
        if self.places.max_results == 0 {
            self.places.max_results = default_max_results();
        }
        if self.places.api_key.as_deref().is_some_and(|key| key.trim().is_empty()) {
            self.places.api_key = None;
        }
        if self.weather.base_url.is_empty() {
            self.weather.base_url = default_weather_base_url();
        }
        if self.http.timeout_seconds == 0 {
            self.http.timeout_seconds = default_http_timeout();
        }
        if self.server.host.is_empty() {
            self.server.host = default_server_host();
        }
        if self.server.port == 0 {
            self.server.port = default_server_port();
        }
        if self.server.request_timeout_seconds == 0 {
            self.server.request_timeout_seconds = default_request_timeout();
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

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.http.timeout_seconds > 300 {
            return Err(WeatherWiseError::config("HTTP timeout cannot exceed 300 seconds").into());
        }

        if self.http.max_retries > 10 {
            return Err(WeatherWiseError::config("HTTP max retries cannot exceed 10").into());
        }

        if !(1..=50_000).contains(&self.places.search_radius_m) {
            return Err(WeatherWiseError::config(
                "Search radius must be between 1 and 50000 metres",
            )
            .into());
        }

        if !(1..=60).contains(&self.places.max_results) {
            return Err(
                WeatherWiseError::config("Maximum results must be between 1 and 60").into(),
            );
        }

        if self.server.request_timeout_seconds > 300 {
            return Err(
                WeatherWiseError::config("Request timeout cannot exceed 300 seconds").into(),
            );
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(WeatherWiseError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(WeatherWiseError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for (name, url) in [
            ("Places API", &self.places.base_url),
            ("Weather API", &self.weather.base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(WeatherWiseError::config(format!(
                    "{name} base URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::io::Write as _;
    use std::path::Path;
    use std::sync::Mutex;

    /// Serialises tests that read or mutate process environment variables
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn write_config(dir: &Path, contents: &str) -> PathBuf {
        std::fs::create_dir_all(dir).unwrap();
        let path = dir.join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "{contents}").unwrap();
        path
    }

    #[test]
    fn test_default_config() {
        let config = WeatherWiseConfig::default();
        assert_eq!(config.places.base_url, "https://maps.googleapis.com/maps/api");
        assert_eq!(config.places.search_radius_m, 5000);
        assert_eq!(config.places.max_results, 60);
        assert_eq!(config.weather.base_url, "https://api.open-meteo.com/v1");
        assert_eq!(config.http.timeout_seconds, 30);
        assert_eq!(config.http.max_retries, 3);
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.logging.level, "info");
        assert!(config.places.api_key.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = WeatherWiseConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_invalid_log_format() {
        let mut config = WeatherWiseConfig::default();
        config.logging.format = "xml".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = WeatherWiseConfig::default();
        config.http.timeout_seconds = 500; // Invalid - too high
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout cannot exceed"));

        let mut config = WeatherWiseConfig::default();
        config.http.max_retries = 11;
        assert!(config.validate().is_err());

        let mut config = WeatherWiseConfig::default();
        config.places.search_radius_m = 50_001;
        assert!(config.validate().is_err());

        let mut config = WeatherWiseConfig::default();
        config.places.max_results = 61;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_base_url_scheme() {
        let mut config = WeatherWiseConfig::default();
        config.weather.base_url = "ftp://example.com".to_string();
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("Weather API base URL"));
    }

    #[test]
    fn test_apply_defaults_fills_zero_values() {
        let mut config = WeatherWiseConfig::default();
        config.places.base_url.clear();
        config.places.search_radius_m = 0;
        config.places.api_key = Some("  ".to_string());
        config.server.port = 0;
        config.logging.format.clear();

        config.apply_defaults();

        assert_eq!(config.places.base_url, "https://maps.googleapis.com/maps/api");
        assert_eq!(config.places.search_radius_m, 5000);
        assert!(config.places.api_key.is_none());
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_from_toml_file() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = env::temp_dir().join(format!("weatherwise-config-{}", std::process::id()));
        let path = write_config(
            &dir,
            "[places]\napi_key = \"file-key\"\nsearch_radius_m = 2500\n\n[server]\nport = 8080\n",
        );

        let config = WeatherWiseConfig::load_from_path(Some(path)).unwrap();
        assert_eq!(config.places.api_key.as_deref(), Some("file-key"));
        assert_eq!(config.places.search_radius_m, 2500);
        assert_eq!(config.places.max_results, 60);
        assert_eq!(config.server.port, 8080);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_environment_variable_override() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = env::temp_dir().join(format!("weatherwise-config-env-{}", std::process::id()));
        let with_key = write_config(
            &dir.join("with-key"),
            "[places]\napi_key = \"file-key\"\n\n[server]\nport = 8080\n",
        );
        let without_key = write_config(&dir.join("without-key"), "[server]\nport = 8080\n");

        // SAFETY: Test environment, guarded by ENV_LOCK
        unsafe {
            env::set_var("WEATHERWISE_PLACES__API_KEY", "env-key");
            env::set_var("WEATHERWISE_SERVER__PORT", "9090");
            env::set_var(PLACES_API_KEY_ENV, "fallback-key");
        }
        let overridden = WeatherWiseConfig::load_from_path(Some(with_key.clone()));

        // SAFETY: Test environment, guarded by ENV_LOCK
        unsafe {
            env::remove_var("WEATHERWISE_PLACES__API_KEY");
            env::remove_var("WEATHERWISE_SERVER__PORT");
        }
        let fallback = WeatherWiseConfig::load_from_path(Some(without_key));
        let file_wins = WeatherWiseConfig::load_from_path(Some(with_key));

        // SAFETY: Test cleanup
        unsafe {
            env::remove_var(PLACES_API_KEY_ENV);
        }
        std::fs::remove_dir_all(&dir).unwrap();

        let overridden = overridden.unwrap();
        assert_eq!(overridden.places.api_key.as_deref(), Some("env-key"));
        assert_eq!(overridden.server.port, 9090);

        let fallback = fallback.unwrap();
        assert_eq!(fallback.places.api_key.as_deref(), Some("fallback-key"));
        assert_eq!(fallback.server.port, 8080);

        let file_wins = file_wins.unwrap();
        assert_eq!(file_wins.places.api_key.as_deref(), Some("file-key"));
        assert_eq!(file_wins.server.port, 8080);
    }

    #[test]
    fn test_config_path_generation() {
        let path = WeatherWiseConfig::get_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("weatherwise"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }
}
