//! Configuration management via environment variables
//!
//! Provides helper functions for reading environment variables with fallback
//! to deprecated variable names with warning logs, plus the typed
//! configuration sections the service is built from.

use crate::common::error::ConfigError;
use crate::registry::EndpointRegistry;
use std::time::Duration;

/// Default gateway in front of all monitored services
pub const DEFAULT_GATEWAY_URL: &str = "https://apiv2.emil.de";

/// Login path relative to the gateway
const LOGIN_PATH: &str = "/authservice/v1/login";

/// Token refresh path relative to the gateway
const REFRESH_PATH: &str = "/authservice/v1/refresh-token";

/// Get an environment variable with fallback to a deprecated name
///
/// If the new variable name is set, returns its value.
/// If only the old (deprecated) variable name is set, returns its value
/// and logs a deprecation warning.
///
/// # Example
/// ```
/// use healthboard::config::get_env_with_fallback;
///
/// let user = get_env_with_fallback("HEALTHBOARD_USERNAME", "EMIL_USERNAME");
/// ```
pub fn get_env_with_fallback(new_name: &str, old_name: &str) -> Option<String> {
    if let Ok(val) = std::env::var(new_name) {
        return Some(val);
    }
    if let Ok(val) = std::env::var(old_name) {
        tracing::warn!(
            "Environment variable '{}' is deprecated, use '{}' instead",
            old_name,
            new_name
        );
        return Some(val);
    }
    None
}

/// Read a required, non-empty variable
fn require_env(new_name: &'static str, old_name: &str) -> Result<String, ConfigError> {
    match get_env_with_fallback(new_name, old_name) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(new_name)),
    }
}

/// Read a strictly positive number of seconds
///
/// An unparsable value is an error rather than the default.
fn duration_secs_from_env(name: &'static str, default_secs: u64) -> Result<Duration, ConfigError> {
    let Ok(raw) = std::env::var(name) else {
        return Ok(Duration::from_secs(default_secs));
    };
    let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::Invalid {
        name,
        reason: format!("'{}' is not a whole number of seconds", raw),
    })?;
    if secs == 0 {
        return Err(ConfigError::Invalid {
            name,
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(Duration::from_secs(secs))
}

/// Login identity for the gateway
///
/// Both values are required configuration; there is no built-in default.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Gateway user name
    pub username: String,
    password: String,
}

impl Credentials {
    /// Create credentials from explicit values
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Load credentials from `HEALTHBOARD_USERNAME` / `HEALTHBOARD_PASSWORD`
    /// (deprecated: `EMIL_USERNAME` / `EMIL_PASSWORD`).
    pub fn from_env() -> Result<Self, ConfigError> {
        let username = require_env("HEALTHBOARD_USERNAME", "EMIL_USERNAME")?;
        let password = require_env("HEALTHBOARD_PASSWORD", "EMIL_PASSWORD")?;
        Ok(Self { username, password })
    }

    /// Password sent to the login endpoint
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Gateway URLs for login, refresh and the built-in endpoint registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Base URL of the gateway (no trailing slash)
    pub base_url: String,
    /// Login endpoint
    pub login_url: String,
    /// Token refresh endpoint
    pub refresh_url: String,
}

impl GatewayConfig {
    /// Derive login and refresh URLs from a gateway base URL
    pub fn from_base_url(base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            login_url: format!("{}{}", base_url, LOGIN_PATH),
            refresh_url: format!("{}{}", base_url, REFRESH_PATH),
            base_url,
        }
    }

    /// Load gateway configuration from environment variables.
    pub fn from_env() -> Self {
        let base_url = std::env::var("HEALTHBOARD_GATEWAY_URL")
            .unwrap_or_else(|_| DEFAULT_GATEWAY_URL.to_string());
        let mut config = Self::from_base_url(&base_url);
        if let Ok(url) = std::env::var("HEALTHBOARD_LOGIN_URL") {
            config.login_url = url;
        }
        if let Ok(url) = std::env::var("HEALTHBOARD_REFRESH_URL") {
            config.refresh_url = url;
        }
        config
    }
}

/// Timer and timeout settings for the background jobs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleConfig {
    /// Interval between probe cycles
    pub probe_interval: Duration,
    /// Interval between credential renewals
    pub refresh_interval: Duration,
    /// Bound on every outgoing request
    pub request_timeout: Duration,
    /// Delay before the first authentication
    pub startup_delay: Duration,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            probe_interval: Duration::from_secs(30),
            refresh_interval: Duration::from_secs(600),
            request_timeout: Duration::from_secs(5),
            startup_delay: Duration::from_secs(1),
        }
    }
}

impl ScheduleConfig {
    /// Load schedule configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            probe_interval: duration_secs_from_env(
                "HEALTHBOARD_PROBE_INTERVAL_SECS",
                defaults.probe_interval.as_secs(),
            )?,
            refresh_interval: duration_secs_from_env(
                "HEALTHBOARD_REFRESH_INTERVAL_SECS",
                defaults.refresh_interval.as_secs(),
            )?,
            request_timeout: duration_secs_from_env(
                "HEALTHBOARD_REQUEST_TIMEOUT_SECS",
                defaults.request_timeout.as_secs(),
            )?,
            startup_delay: duration_secs_from_env(
                "HEALTHBOARD_STARTUP_DELAY_SECS",
                defaults.startup_delay.as_secs(),
            )?,
        })
    }
}

/// Everything the engine needs, loaded once at startup
#[derive(Debug, Clone)]
pub struct BoardConfig {
    /// Login identity
    pub credentials: Credentials,
    /// Gateway URLs
    pub gateway: GatewayConfig,
    /// Job timing
    pub schedule: ScheduleConfig,
    /// Monitored endpoints
    pub registry: EndpointRegistry,
}

impl BoardConfig {
    /// Load the full configuration. Any error here is fatal.
    pub fn from_env() -> Result<Self, ConfigError> {
        let credentials = Credentials::from_env()?;
        let gateway = GatewayConfig::from_env();
        let schedule = ScheduleConfig::from_env()?;
        let registry = match std::env::var("HEALTHBOARD_ENDPOINTS_FILE") {
            Ok(path) => EndpointRegistry::from_yaml_file(path)?,
            Err(_) => EndpointRegistry::builtin(&gateway.base_url),
        };
        Ok(Self {
            credentials,
            gateway,
            schedule,
            registry,
        })
    }
}
