use crate::auth::jwt::JwtConfig;

/// Default interval between automatic rotation sweeps, in seconds.
const DEFAULT_AUTO_ROTATION_INTERVAL_SECS: u64 = 3600;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Whether the in-server automatic rotation sweep runs (default: off).
    pub auto_rotation_enabled: bool,
    /// Interval between automatic sweeps in seconds (default: `3600`).
    pub auto_rotation_interval_secs: u64,
    /// JWT token configuration (secret, expiry duration).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                        | Default                 |
    /// |--------------------------------|-------------------------|
    /// | `HOST`                         | `0.0.0.0`               |
    /// | `PORT`                         | `3000`                  |
    /// | `CORS_ORIGINS`                 | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`         | `30`                    |
    /// | `AUTO_ROTATION_ENABLED`        | `false`                 |
    /// | `AUTO_ROTATION_INTERVAL_SECS`  | `3600`                  |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let auto_rotation_enabled = std::env::var("AUTO_ROTATION_ENABLED")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let auto_rotation_interval_secs: u64 = std::env::var("AUTO_ROTATION_INTERVAL_SECS")
            .unwrap_or_else(|_| DEFAULT_AUTO_ROTATION_INTERVAL_SECS.to_string())
            .parse()
            .expect("AUTO_ROTATION_INTERVAL_SECS must be a valid u64");

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            auto_rotation_enabled,
            auto_rotation_interval_secs,
            jwt,
        }
    }
}
