//! Application configuration
//!
//! Values come from built-in defaults overridden by `ATTENDIFY_*` environment
//! variables. The session secret may also be given as plain `SECRET_KEY`.

use auth::SessionConfig;
use config::{Config, ConfigError, Environment};
use serde::Deserialize;
use tracing::warn;

/// Secret used when none is configured; only suitable for development
pub const DEFAULT_SECRET_KEY: &str = "dev-secret-key-change-me";

/// Service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Address the HTTP server binds to
    pub bind_address: String,
    /// Secret used to sign session tokens
    pub secret_key: String,
    /// Session lifetime in seconds
    pub session_ttl_seconds: u64,
    /// Username of the administrator account ensured at start-up
    pub admin_username: String,
    /// Password given to that account when it has to be created
    pub admin_password: String,
    /// Attendance entries per page in the staff listing
    pub page_size: u32,
}

impl AppConfig {
    /// Load the configuration from defaults and the environment
    ///
    /// # Environment Variables
    /// - `ATTENDIFY_BIND_ADDRESS` (default: `0.0.0.0:3000`)
    /// - `ATTENDIFY_SECRET_KEY` or `SECRET_KEY` (default: development secret)
    /// - `ATTENDIFY_SESSION_TTL_SECONDS` (default: 28800)
    /// - `ATTENDIFY_ADMIN_USERNAME` (default: `admin`)
    /// - `ATTENDIFY_ADMIN_PASSWORD` (default: `admin123`)
    /// - `ATTENDIFY_PAGE_SIZE` (default: 12)
    pub fn from_env() -> Result<Self, ConfigError> {
        let config: AppConfig = Config::builder()
            .set_default("bind_address", "0.0.0.0:3000")?
            .set_default("secret_key", DEFAULT_SECRET_KEY)?
            .set_default("session_ttl_seconds", 28_800)?
            .set_default("admin_username", "admin")?
            .set_default("admin_password", "admin123")?
            .set_default("page_size", 12)?
            .add_source(Environment::with_prefix("ATTENDIFY").try_parsing(true))
            .set_override_option("secret_key", std::env::var("SECRET_KEY").ok())?
            .build()?
            .try_deserialize()?;

        if config.page_size == 0 {
            return Err(ConfigError::Message(
                "page_size must be greater than zero".to_string(),
            ));
        }

        if config.secret_key == DEFAULT_SECRET_KEY {
            warn!("Using the default session secret; set SECRET_KEY in production");
        }

        Ok(config)
    }

    /// Settings for signing session tokens
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            secret: self.secret_key.clone(),
            ttl_seconds: self.session_ttl_seconds,
        }
    }
}
