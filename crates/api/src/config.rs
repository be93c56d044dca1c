use crate::auth::session::SessionConfig;
use crate::middleware::session_gate::GateConfig;

/// Default location of the external login flow.
const DEFAULT_LOGIN_URL: &str = "/auth/signin";

/// Server configuration loaded from environment variables.
///
/// All fields except the session secret have defaults suitable for local
/// development. In production, override via environment variables.
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
    /// Session cookie name, signing secret, and token lifetime.
    pub session: SessionConfig,
    /// Protected prefix and the login/logout paths exempt from gating.
    pub gate: GateConfig,
    /// Where the login page sends users to authenticate.
    pub login_url: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `LOGIN_URL`            | `/auth/signin`             |
    ///
    /// See [`SessionConfig::from_env`] and [`GateConfig::from_env`] for the
    /// session and gate variables.
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

        let login_url = std::env::var("LOGIN_URL").unwrap_or_else(|_| DEFAULT_LOGIN_URL.into());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            session: SessionConfig::from_env(),
            gate: GateConfig::from_env(),
            login_url,
        }
    }
}
