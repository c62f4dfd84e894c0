//! Panel configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `FARMALINK_HOST` - Bind address (default: 127.0.0.1)
//! - `FARMALINK_PORT` - Listen port (default: 3001)
//! - `FARMALINK_BASE_URL` - Public URL of the panel (default: `http://localhost:3001`);
//!   an `https://` URL marks the session cookie `Secure`
//! - `FARMALINK_API_URL` - FarmaLink REST API (default: `https://metodologia-api.onrender.com`)
//! - `FARMALINK_API_TIMEOUT_SECS` - API request timeout (default: 30)
//! - `FARMALINK_DATA_DIR` - Directory for the durable slots (default: ./data)
//! - `FARMALINK_SESSION_HOURS` - Session inactivity expiry (default: 24)
//! - `FARMALINK_STATIC_DIR` - Static assets (default: crates/panel/static)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` / `SENTRY_TRACES_SAMPLE_RATE` - 0.0 to 1.0 (default: 1.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_API_URL: &str = "https://metodologia-api.onrender.com";
const DEFAULT_BASE_URL: &str = "http://localhost:3001";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Panel configuration.
#[derive(Clone)]
pub struct PanelConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL of the panel
    pub base_url: String,
    /// FarmaLink REST API base URL, without trailing slash
    pub api_url: String,
    /// Timeout for each API request
    pub api_timeout: Duration,
    /// Directory holding the durable slots (alert log)
    pub data_dir: PathBuf,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Session inactivity expiry
    pub session_hours: i64,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<SecretString>,
    /// Sentry environment (e.g., "development", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

impl std::fmt::Debug for PanelConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PanelConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("base_url", &self.base_url)
            .field("api_url", &self.api_url)
            .field("api_timeout", &self.api_timeout)
            .field("data_dir", &self.data_dir)
            .field("static_dir", &self.static_dir)
            .field("session_hours", &self.session_hours)
            .field("sentry_dsn", &self.sentry_dsn.as_ref().map(|_| "[REDACTED]"))
            .field("sentry_environment", &self.sentry_environment)
            .finish_non_exhaustive()
    }
}

impl PanelConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env("FARMALINK_HOST", "127.0.0.1")?;
        let port = parse_env("FARMALINK_PORT", "3001")?;
        let base_url = parse_url("FARMALINK_BASE_URL", DEFAULT_BASE_URL)?;
        let api_url = parse_url("FARMALINK_API_URL", DEFAULT_API_URL)?;
        let api_timeout = Duration::from_secs(parse_env("FARMALINK_API_TIMEOUT_SECS", "30")?);
        let data_dir = PathBuf::from(get_env_or_default("FARMALINK_DATA_DIR", "./data"));
        let static_dir =
            PathBuf::from(get_env_or_default("FARMALINK_STATIC_DIR", "crates/panel/static"));
        let session_hours: i64 = parse_env("FARMALINK_SESSION_HOURS", "24")?;
        if session_hours <= 0 {
            return Err(ConfigError::InvalidEnvVar(
                "FARMALINK_SESSION_HOURS".to_string(),
                "must be a positive number of hours".to_string(),
            ));
        }

        let sentry_dsn = get_optional_env("SENTRY_DSN").map(SecretString::from);
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get_optional_env("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            host,
            port,
            base_url,
            api_url,
            api_timeout,
            data_dir,
            static_dir,
            session_hours,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Configuration with every default applied, for tests and tooling.
    #[must_use]
    pub fn defaults(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3001,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            api_timeout: Duration::from_secs(30),
            data_dir: data_dir.into(),
            static_dir: PathBuf::from("crates/panel/static"),
            session_hours: 24,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 1.0,
        }
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the panel is served over HTTPS.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating blank as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse an environment variable (or its default) with `FromStr`.
fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(key, default)
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Validate an http(s) URL variable, returning it without trailing slashes.
fn parse_url(key: &str, default: &str) -> Result<String, ConfigError> {
    let url: Url = parse_env(key, default)?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(url.as_str().trim_end_matches('/').to_string())
}
