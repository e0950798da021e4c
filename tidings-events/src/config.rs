//! Event bus configuration

use serde::Deserialize;
use std::env;

/// Event bus configuration
///
/// Can be built in code, read from a TOML table, or taken from the
/// environment:
///
/// - `TIDINGS_BUS_NAME` - name used in log records
/// - `TIDINGS_BUS_LOGGING=1|0` - log publishes and registrations
/// - `TIDINGS_BUS_WARN_UNMATCHED=1|0` - warn when an event has no subscribers
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EventBusConfig {
    /// Bus name for log records
    pub name: String,

    /// Enable event logging
    pub enable_logging: bool,

    /// Log a warning instead of a debug record when nothing matches an event
    pub warn_on_unmatched: bool,
}

impl Default for EventBusConfig {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            enable_logging: true,
            warn_on_unmatched: false,
        }
    }
}

impl EventBusConfig {
    /// Parse a TOML document holding the configuration fields.
    ///
    /// ```rust
    /// use tidings_events::EventBusConfig;
    ///
    /// let config = EventBusConfig::from_toml_str("name = \"sensors\"").unwrap();
    /// assert_eq!(config.name, "sensors");
    /// assert!(config.enable_logging);
    /// ```
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Create config from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create config from any key lookup, with the same keys as [`from_env`](Self::from_env).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(name) = lookup("TIDINGS_BUS_NAME") {
            config.name = name;
        }
        if let Some(value) = lookup("TIDINGS_BUS_LOGGING") {
            config.enable_logging = parse_flag("TIDINGS_BUS_LOGGING", &value)?;
        }
        if let Some(value) = lookup("TIDINGS_BUS_WARN_UNMATCHED") {
            config.warn_on_unmatched = parse_flag("TIDINGS_BUS_WARN_UNMATCHED", &value)?;
        }

        Ok(config)
    }
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
        }),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}
