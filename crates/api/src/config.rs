use roster_core::error::CoreError;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Seconds to wait for in-flight import jobs on shutdown (default: `30`).
    pub shutdown_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 3000,
            request_timeout_secs: 30,
            shutdown_timeout_secs: 30,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default   |
    /// |-------------------------|-----------|
    /// | `HOST`                  | `0.0.0.0` |
    /// | `PORT`                  | `3000`    |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`      |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `30`      |
    pub fn from_env() -> Result<Self, CoreError> {
        let defaults = Self::default();

        Ok(Self {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: parse_var("PORT", defaults.port)?,
            request_timeout_secs: parse_var("REQUEST_TIMEOUT_SECS", defaults.request_timeout_secs)?,
            shutdown_timeout_secs: parse_var(
                "SHUTDOWN_TIMEOUT_SECS",
                defaults.shutdown_timeout_secs,
            )?,
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, CoreError> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| CoreError::Config(format!("{name} must be a valid number, got '{raw}'"))),
        Err(_) => Ok(default),
    }
}
