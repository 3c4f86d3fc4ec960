//! Application configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional
//! TOML file, then `THERMOWATCH_*` environment variables. Nested keys use a
//! double underscore, e.g. `THERMOWATCH_WEATHER__API_KEY`.

use std::path::Path;
use std::time::Duration;

use application::error::ApplicationError;
use application::services::{DEFAULT_EVENT_CAPACITY, DEFAULT_REFRESH_INTERVAL};
use domain::value_objects::GeoLocation;
use integration_geoip::GeoIpConfig;
use integration_weather::WeatherConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default configuration file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "thermowatch";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "THERMOWATCH";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Refresh schedule settings
    #[serde(default)]
    pub refresh: RefreshConfig,

    /// Weather API settings
    #[serde(default)]
    pub weather: WeatherAppConfig,

    /// Location source settings
    #[serde(default)]
    pub location: LocationConfig,

    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from `thermowatch.toml` (if present) and the
    /// environment
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or does not deserialize.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::build(None, None)
    }

    /// Load configuration from an explicit file path and the environment
    ///
    /// Unlike [`AppConfig::load`], the file must exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable or invalid.
    pub fn load_from(path: &Path) -> Result<Self, config::ConfigError> {
        Self::build(Some(path), None)
    }

    fn build(
        path: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let builder = config::Config::builder()
            .add_source(file)
            // Override with environment variables (e.g., THERMOWATCH_REFRESH__INTERVAL_SECS)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            );

        builder.build()?.try_deserialize()
    }

    /// Check the loaded configuration before anything is started
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` listing every problem found.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        let mut problems = Vec::new();

        if self.refresh.interval_secs == 0 {
            problems.push("refresh.interval_secs must be greater than zero".to_string());
        }
        if self.refresh.event_capacity == 0 {
            problems.push("refresh.event_capacity must be greater than zero".to_string());
        }
        if !self.weather.has_api_key() {
            problems.push(format!(
                "weather.api_key is not set (use {ENV_PREFIX}_WEATHER__API_KEY)"
            ));
        }
        if self.weather.timeout_secs == 0 {
            problems.push("weather.timeout_secs must be greater than zero".to_string());
        }
        if self.location.provider == LocationProvider::Static {
            if let Err(e) = self.location.static_location() {
                problems.push(e.to_string());
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ApplicationError::Configuration(problems.join("; ")))
        }
    }
}

// ==============================
// Refresh Configuration
// ==============================

/// Refresh schedule configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshConfig {
    /// Seconds between refreshes (default: 600)
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Buffered events per subscriber before it starts lagging (default: 16)
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
}

const fn default_interval_secs() -> u64 {
    DEFAULT_REFRESH_INTERVAL.as_secs()
}

const fn default_event_capacity() -> usize {
    DEFAULT_EVENT_CAPACITY
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            event_capacity: default_event_capacity(),
        }
    }
}

impl RefreshConfig {
    /// Refresh interval as a duration
    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

// ==============================
// Weather Configuration
// ==============================

/// Weather API configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct WeatherAppConfig {
    /// OpenWeatherMap API base URL
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,

    /// OpenWeatherMap API key (sensitive - uses `SecretString`)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_weather_timeout")]
    pub timeout_secs: u64,
}

fn default_weather_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

const fn default_weather_timeout() -> u64 {
    30
}

impl Default for WeatherAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
            api_key: None,
            timeout_secs: default_weather_timeout(),
        }
    }
}

impl fmt::Debug for WeatherAppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherAppConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl WeatherAppConfig {
    /// Whether a non-blank API key is configured
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().trim().is_empty())
    }
}

impl From<&WeatherAppConfig> for WeatherConfig {
    fn from(config: &WeatherAppConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            api_key: config
                .api_key
                .as_ref()
                .map(|k| k.expose_secret().to_string())
                .unwrap_or_default(),
            timeout_secs: config.timeout_secs,
        }
    }
}

// ==============================
// Location Configuration
// ==============================

/// Where the current location comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationProvider {
    /// Public-IP geolocation lookup on every refresh
    #[default]
    GeoIp,
    /// Fixed coordinate from configuration
    Static,
}

impl fmt::Display for LocationProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GeoIp => write!(f, "geoip"),
            Self::Static => write!(f, "static"),
        }
    }
}

/// Location source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Location provider (default: geoip)
    #[serde(default)]
    pub provider: LocationProvider,

    /// Latitude for the static provider
    #[serde(default)]
    pub latitude: Option<f64>,

    /// Longitude for the static provider
    #[serde(default)]
    pub longitude: Option<f64>,

    /// Base URL of the IP geolocation service
    #[serde(default = "default_geoip_base_url")]
    pub geoip_base_url: String,

    /// Geolocation request timeout in seconds (default: 10)
    #[serde(default = "default_location_timeout")]
    pub timeout_secs: u64,
}

fn default_geoip_base_url() -> String {
    "http://ip-api.com".to_string()
}

const fn default_location_timeout() -> u64 {
    10
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            provider: LocationProvider::default(),
            latitude: None,
            longitude: None,
            geoip_base_url: default_geoip_base_url(),
            timeout_secs: default_location_timeout(),
        }
    }
}

impl LocationConfig {
    /// The configured fixed coordinate
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` if either coordinate is
    /// missing or out of range.
    pub fn static_location(&self) -> Result<GeoLocation, ApplicationError> {
        let (Some(latitude), Some(longitude)) = (self.latitude, self.longitude) else {
            return Err(ApplicationError::Configuration(
                "location.latitude and location.longitude are required for the static provider"
                    .to_string(),
            ));
        };
        GeoLocation::new(latitude, longitude)
            .map_err(|e| ApplicationError::Configuration(format!("location: {e}")))
    }

    /// Client settings for the IP geolocation service
    #[must_use]
    pub fn geoip(&self) -> GeoIpConfig {
        GeoIpConfig {
            base_url: self.geoip_base_url.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}

// ==============================
// Logging Configuration
// ==============================

/// Log output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set (default: "info")
    #[serde(default = "default_log_filter")]
    pub filter: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn env(vars: &[(&str, &str)]) -> Option<config::Map<String, String>> {
        Some(
            vars.iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        )
    }

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn valid_config() -> AppConfig {
        AppConfig {
            weather: WeatherAppConfig {
                api_key: Some(SecretString::from("key")),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn defaults() {
        let config = AppConfig::default();
        assert_eq!(config.refresh.interval_secs, 600);
        assert_eq!(config.refresh.interval(), Duration::from_secs(600));
        assert_eq!(config.refresh.event_capacity, 16);
        assert_eq!(
            config.weather.base_url,
            "https://api.openweathermap.org/data/2.5"
        );
        assert_eq!(config.weather.timeout_secs, 30);
        assert_eq!(config.location.provider, LocationProvider::GeoIp);
        assert_eq!(config.location.geoip_base_url, "http://ip-api.com");
        assert_eq!(config.logging.filter, "info");
        assert!(!config.logging.json);
    }

    #[test]
    fn refresh_defaults_follow_notifier_constants() {
        let refresh = RefreshConfig::default();
        assert_eq!(refresh.interval(), DEFAULT_REFRESH_INTERVAL);
        assert_eq!(refresh.event_capacity, DEFAULT_EVENT_CAPACITY);

        let parsed: RefreshConfig = toml::from_str("").unwrap();
        assert_eq!(parsed.interval(), DEFAULT_REFRESH_INTERVAL);
        assert_eq!(parsed.event_capacity, DEFAULT_EVENT_CAPACITY);
    }

    #[test]
    fn build_without_sources_uses_defaults() {
        let config = AppConfig::build(None, env(&[])).unwrap();
        assert_eq!(config.refresh.interval_secs, 600);
        assert!(config.weather.api_key.is_none());
    }

    #[test]
    fn load_from_file() {
        let file = write_config(
            r#"
            [refresh]
            interval_secs = 120

            [weather]
            api_key = "from-file"
            timeout_secs = 5

            [location]
            provider = "static"
            latitude = 52.52
            longitude = 13.405

            [logging]
            json = true
            "#,
        );

        let config = AppConfig::build(Some(file.path()), env(&[])).unwrap();

        assert_eq!(config.refresh.interval_secs, 120);
        assert_eq!(config.refresh.event_capacity, 16);
        assert_eq!(
            config.weather.api_key.as_ref().unwrap().expose_secret(),
            "from-file"
        );
        assert_eq!(config.weather.timeout_secs, 5);
        assert_eq!(config.location.provider, LocationProvider::Static);
        assert!(config.logging.json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn environment_overrides_file() {
        let file = write_config(
            r#"
            [refresh]
            interval_secs = 120

            [weather]
            api_key = "from-file"
            "#,
        );

        let config = AppConfig::build(
            Some(file.path()),
            env(&[
                ("THERMOWATCH_REFRESH__INTERVAL_SECS", "30"),
                ("THERMOWATCH_WEATHER__API_KEY", "from-env"),
                ("THERMOWATCH_LOCATION__PROVIDER", "static"),
            ]),
        )
        .unwrap();

        assert_eq!(config.refresh.interval_secs, 30);
        assert_eq!(
            config.weather.api_key.as_ref().unwrap().expose_secret(),
            "from-env"
        );
        assert_eq!(config.location.provider, LocationProvider::Static);
    }

    #[test]
    fn explicit_file_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(AppConfig::load_from(&missing).is_err());
    }

    #[test]
    fn unknown_provider_is_rejected() {
        let file = write_config(
            r#"
            [location]
            provider = "gps"
            "#,
        );
        assert!(AppConfig::build(Some(file.path()), env(&[])).is_err());
    }

    #[test]
    fn validate_accepts_minimal_config() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn validate_requires_api_key() {
        let err = AppConfig::default().validate().unwrap_err();
        assert!(matches!(err, ApplicationError::Configuration(ref m) if m.contains("api_key")));

        let mut config = valid_config();
        config.weather.api_key = Some(SecretString::from("   "));
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_values() {
        let mut config = valid_config();
        config.refresh.interval_secs = 0;
        config.refresh.event_capacity = 0;

        let err = config.validate().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("interval_secs"));
        assert!(message.contains("event_capacity"));
    }

    #[test]
    fn validate_static_provider_needs_coordinates() {
        let mut config = valid_config();
        config.location.provider = LocationProvider::Static;
        assert!(config.validate().is_err());

        config.location.latitude = Some(91.0);
        config.location.longitude = Some(0.0);
        assert!(config.validate().is_err());

        config.location.latitude = Some(52.52);
        config.location.longitude = Some(13.405);
        assert!(config.validate().is_ok());
        let location = config.location.static_location().unwrap();
        assert!((location.latitude() - 52.52).abs() < 1e-9);
    }

    #[test]
    fn geoip_provider_ignores_missing_coordinates() {
        let config = valid_config();
        assert_eq!(config.location.provider, LocationProvider::GeoIp);
        assert!(config.location.latitude.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn weather_config_conversion_exposes_key() {
        let config = valid_config();
        let client_config = WeatherConfig::from(&config.weather);
        assert_eq!(client_config.api_key, "key");
        assert_eq!(client_config.base_url, config.weather.base_url);
        assert_eq!(client_config.timeout_secs, 30);
    }

    #[test]
    fn geoip_config_conversion() {
        let location = LocationConfig {
            geoip_base_url: "http://localhost:9000".to_string(),
            timeout_secs: 3,
            ..Default::default()
        };
        let geoip = location.geoip();
        assert_eq!(geoip.base_url, "http://localhost:9000");
        assert_eq!(geoip.timeout_secs, 3);
    }

    #[test]
    fn debug_redacts_api_key() {
        let debug = format!("{:?}", valid_config());
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("\"key\""));
    }

    #[test]
    fn serialization_skips_api_key() {
        let toml = toml::to_string(&valid_config()).unwrap();
        assert!(!toml.contains("api_key"));
        assert!(toml.contains("interval_secs = 600"));
    }

    #[test]
    fn provider_display() {
        assert_eq!(LocationProvider::GeoIp.to_string(), "geoip");
        assert_eq!(LocationProvider::Static.to_string(), "static");
    }
}
