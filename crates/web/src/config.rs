//! Application configuration.
//!
//! This module provides the configuration type handed to the application
//! factory. It supports programmatic construction, environment variable
//! overrides, and string-keyed updates for callers that only know a key name
//! at runtime.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `APP_NAME` | beacon | Application name reported by `/health` |
//! | `APP_HOST` | 127.0.0.1 | Host to bind |
//! | `APP_PORT` | 8080 | Server port |
//! | `APP_LOG_LEVEL` | info | Log level |
//! | `APP_MAX_BODY_SIZE` | 1048576 | Max request body (bytes) |
//! | `APP_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `APP_ENABLE_CORS` | true | Enable CORS |
//! | `APP_CORS_ORIGINS` | * | Allowed origins |
//! | `APP_ENABLE_REQUEST_ID` | true | Emit `x-request-id` headers |
//! | `APP_BASE_URL` | http://localhost:8080 | Public base URL |
//! | `APP_TESTING` | false | Testing mode |
//!
//! # Example
//!
//! ```rust
//! use beacon_web::AppConfig;
//!
//! let mut config = AppConfig::default();
//! config.update([("TESTING", "true")]).unwrap();
//! assert!(config.is_testing());
//!
//! let config = AppConfig {
//!     port: 3000,
//!     host: "0.0.0.0".to_string(),
//!     ..Default::default()
//! };
//! assert_eq!(config.socket_addr(), "0.0.0.0:3000");
//! ```

use clap::{ArgAction, Parser};
use tracing::warn;
use url::Url;

use crate::error::ConfigError;

/// Log levels accepted by [`AppConfig::log_level`].
const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Keys accepted by [`AppConfig::update`]; each is also read from `APP_<KEY>`.
pub const SETTING_KEYS: [&str; 11] = [
    "NAME",
    "HOST",
    "PORT",
    "LOG_LEVEL",
    "MAX_BODY_SIZE",
    "REQUEST_TIMEOUT",
    "ENABLE_CORS",
    "CORS_ORIGINS",
    "ENABLE_REQUEST_ID",
    "BASE_URL",
    "TESTING",
];

/// Application configuration.
///
/// Constructed from environment variables with [`AppConfig::from_env`], from
/// command line arguments with [`AppConfig::parse`], or programmatically.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "beacon")]
#[command(about = "Beacon web application server")]
pub struct AppConfig {
    /// Application name.
    #[arg(long, env = "APP_NAME", default_value = "beacon")]
    pub name: String,

    /// Host address to bind to.
    #[arg(long, env = "APP_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, env = "APP_PORT", default_value = "8080")]
    pub port: u16,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "APP_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Maximum request body size in bytes.
    #[arg(long, env = "APP_MAX_BODY_SIZE", default_value = "1048576")]
    pub max_body_size: usize,

    /// Request timeout in seconds.
    #[arg(long, env = "APP_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Enable CORS.
    #[arg(long, env = "APP_ENABLE_CORS", default_value_t = true, action = ArgAction::Set)]
    pub enable_cors: bool,

    /// Allowed CORS origins (comma-separated, or * for all).
    #[arg(long, env = "APP_CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,

    /// Set and propagate `x-request-id` headers.
    #[arg(long, env = "APP_ENABLE_REQUEST_ID", default_value_t = true, action = ArgAction::Set)]
    pub enable_request_id: bool,

    /// Public base URL of the application.
    #[arg(long, env = "APP_BASE_URL", default_value = "http://localhost:8080")]
    pub base_url: String,

    /// Testing mode.
    #[arg(long, env = "APP_TESTING", default_value_t = false, action = ArgAction::Set)]
    pub testing: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: "beacon".to_string(),
            host: "127.0.0.1".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            max_body_size: 1024 * 1024, // 1MB
            request_timeout: 30,
            enable_cors: true,
            cors_origins: "*".to_string(),
            enable_request_id: true,
            base_url: "http://localhost:8080".to_string(),
            testing: false,
        }
    }
}

impl AppConfig {
    /// Creates a new AppConfig from environment variables.
    ///
    /// Command line arguments are ignored. A variable that does not parse is
    /// logged and replaced by its default; the other variables still apply.
    pub fn from_env() -> Self {
        match Self::try_parse_from(["beacon"]) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "Environment did not parse as a whole, reading variables one by one");
                Self::from_lookup(|name| std::env::var(name).ok())
            }
        }
    }

    /// Builds a configuration from `APP_*` variables supplied by `lookup`.
    ///
    /// Starts from the defaults and applies each variable on its own, so an
    /// invalid value only costs that one setting.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        for key in SETTING_KEYS {
            let variable = format!("APP_{}", key);
            let Some(value) = lookup(&variable) else {
                continue;
            };
            if let Err(e) = config.update([(key, value.as_str())]) {
                warn!(variable = %variable, error = %e, "Ignoring invalid environment variable");
            }
        }
        config
    }

    /// Creates a configuration suitable for testing.
    ///
    /// Uses ephemeral port 0 and disables layers that only matter for
    /// browsers and log correlation.
    pub fn for_testing() -> Self {
        Self {
            port: 0,
            log_level: "debug".to_string(),
            request_timeout: 5,
            enable_cors: false,
            enable_request_id: false,
            base_url: "http://localhost:0".to_string(),
            testing: true,
            ..Self::default()
        }
    }

    /// Returns whether testing mode is enabled.
    pub fn is_testing(&self) -> bool {
        self.testing
    }

    /// Enables or disables testing mode.
    pub fn set_testing(&mut self, testing: bool) -> &mut Self {
        self.testing = testing;
        self
    }

    /// Applies a batch of string-keyed settings.
    ///
    /// Keys are matched case-insensitively against the upper-snake names of
    /// the fields (`TESTING`, `PORT`, `LOG_LEVEL`, ...). Either every pair is
    /// applied or, on the first unknown key or unparsable value, none is.
    pub fn update<I, K, V>(&mut self, settings: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut staged = self.clone();
        for (key, value) in settings {
            staged.set(key.as_ref(), value.as_ref())?;
        }
        *self = staged;
        Ok(())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key.to_ascii_uppercase().as_str() {
            "NAME" => self.name = value.to_string(),
            "HOST" => self.host = value.to_string(),
            "PORT" => self.port = parse_number(key, value)?,
            "LOG_LEVEL" => self.log_level = value.to_ascii_lowercase(),
            "MAX_BODY_SIZE" => self.max_body_size = parse_number(key, value)?,
            "REQUEST_TIMEOUT" => self.request_timeout = parse_number(key, value)?,
            "ENABLE_CORS" => self.enable_cors = parse_bool(key, value)?,
            "CORS_ORIGINS" => self.cors_origins = value.to_string(),
            "ENABLE_REQUEST_ID" => self.enable_request_id = parse_bool(key, value)?,
            "BASE_URL" => self.base_url = value.to_string(),
            "TESTING" => self.testing = parse_bool(key, value)?,
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        // Port 0 asks the OS for an ephemeral port, which only tests want.
        if self.port == 0 && !self.testing {
            errors.push("Port cannot be 0 outside testing mode".to_string());
        }

        if self.max_body_size == 0 {
            errors.push("Max body size cannot be 0".to_string());
        }

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            errors.push(format!(
                "Unknown log level '{}' (expected one of {})",
                self.log_level,
                LOG_LEVELS.join(", ")
            ));
        }

        match Url::parse(&self.base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => errors.push(format!(
                "Base URL must use http or https, got '{}'",
                url.scheme()
            )),
            Err(e) => errors.push(format!("Invalid base URL '{}': {}", self.base_url, e)),
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: "expected a boolean".to_string(),
        }),
    }
}

fn parse_number<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: e.to_string(),
        })
}
