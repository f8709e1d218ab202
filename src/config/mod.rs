//! Configuration module for Switchboard
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`SWITCHBOARD_*`, `TWILIO_*`, `CLIENT_URL`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use switchboard::config::SwitchboardConfig;
//!
//! // Load defaults
//! let config = SwitchboardConfig::default();
//! assert_eq!(config.server.port, 9000);
//!
//! // Parse from TOML
//! let toml = r#"
//! [server]
//! port = 8080
//! "#;
//! let config: SwitchboardConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.server.port, 8080);
//! ```

pub mod cors;
pub mod error;
pub mod logging;
pub mod server;
pub mod twilio;

pub use cors::CorsConfig;
pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use server::ServerConfig;
pub use twilio::TwilioConfig;

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Unified configuration for the Switchboard server.
///
/// Aggregates the HTTP server settings, Twilio credentials, CORS policy
/// for the browser client, and logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SwitchboardConfig {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Twilio account credentials and token settings
    pub twilio: TwilioConfig,
    /// Cross-origin policy for the browser client
    pub cors: CorsConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl SwitchboardConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Server and logging settings use the `SWITCHBOARD_*` prefix; Twilio
    /// credentials keep their conventional `TWILIO_*` names and the client
    /// URL keeps `CLIENT_URL`. Invalid values are silently ignored
    /// (defaults are kept).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(port) = std::env::var("SWITCHBOARD_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }
        if let Ok(host) = std::env::var("SWITCHBOARD_HOST") {
            self.server.host = host;
        }
        if let Ok(level) = std::env::var("SWITCHBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("SWITCHBOARD_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        if let Ok(sid) = std::env::var("TWILIO_ACCOUNT_SID") {
            self.twilio.account_sid = sid;
        }
        if let Ok(token) = std::env::var("TWILIO_AUTH_TOKEN") {
            self.twilio.auth_token = token;
        }
        if let Ok(key) = std::env::var("TWILIO_API_KEY") {
            self.twilio.api_key = key;
        }
        if let Ok(secret) = std::env::var("TWILIO_API_SECRET") {
            self.twilio.api_secret = secret;
        }
        if let Ok(app) = std::env::var("TWILIO_APP_SID") {
            self.twilio.app_sid = app;
        }

        if let Ok(url) = std::env::var("CLIENT_URL") {
            self.cors.client_url = url;
        }

        self
    }

    /// Validate configuration
    ///
    /// Structural problems are hard errors. Missing Twilio credentials are
    /// not: the server still starts (webhook endpoints that don't sign
    /// anything remain usable), see [`Self::warn_missing_credentials`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation {
                field: "server.port".to_string(),
                message: "port must be non-zero".to_string(),
            });
        }
        if self.twilio.token_ttl_seconds == 0 {
            return Err(ConfigError::Validation {
                field: "twilio.token_ttl_seconds".to_string(),
                message: "token TTL must be non-zero".to_string(),
            });
        }
        Ok(())
    }

    /// Warn about unset Twilio credentials at startup.
    pub fn warn_missing_credentials(&self) {
        let missing = self.twilio.missing_credentials();
        if !missing.is_empty() {
            tracing::warn!(
                missing = %missing.join(", "),
                "Missing Twilio environment variables; token issuance and \
                 conference queries will fail until they are set"
            );
        }
    }
}
