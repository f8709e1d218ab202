//! Twilio account and credential configuration

use serde::{Deserialize, Serialize};

/// Twilio credentials and token settings.
///
/// Credentials are normally supplied through `TWILIO_*` environment
/// variables rather than the config file; the TOML fields exist so a
/// development config can carry them explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TwilioConfig {
    /// Account SID (`AC...`), used as the token subject and REST auth user.
    pub account_sid: String,
    /// Auth token, used for REST API basic auth.
    pub auth_token: String,
    /// API key SID (`SK...`), used as the token issuer.
    pub api_key: String,
    /// API key secret, used to sign access tokens.
    pub api_secret: String,
    /// TwiML application SID (`AP...`) routing outgoing calls.
    pub app_sid: String,
    /// Access token lifetime in seconds.
    pub token_ttl_seconds: u64,
}

impl Default for TwilioConfig {
    fn default() -> Self {
        Self {
            account_sid: String::new(),
            auth_token: String::new(),
            api_key: String::new(),
            api_secret: String::new(),
            app_sid: String::new(),
            token_ttl_seconds: 3600,
        }
    }
}

impl TwilioConfig {
    /// Names of the credentials that are unset, in declaration order.
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.account_sid.is_empty() {
            missing.push("TWILIO_ACCOUNT_SID");
        }
        if self.auth_token.is_empty() {
            missing.push("TWILIO_AUTH_TOKEN");
        }
        if self.api_key.is_empty() {
            missing.push("TWILIO_API_KEY");
        }
        if self.api_secret.is_empty() {
            missing.push("TWILIO_API_SECRET");
        }
        if self.app_sid.is_empty() {
            missing.push("TWILIO_APP_SID");
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twilio_config_defaults() {
        let config = TwilioConfig::default();
        assert_eq!(config.token_ttl_seconds, 3600);
        assert!(config.account_sid.is_empty());
    }

    #[test]
    fn test_missing_credentials_all_unset() {
        let config = TwilioConfig::default();
        let missing = config.missing_credentials();
        assert_eq!(missing.len(), 5);
        assert!(missing.contains(&"TWILIO_ACCOUNT_SID"));
    }

    #[test]
    fn test_missing_credentials_partial() {
        let config = TwilioConfig {
            account_sid: "AC123".to_string(),
            auth_token: "secret".to_string(),
            ..TwilioConfig::default()
        };
        let missing = config.missing_credentials();
        assert_eq!(
            missing,
            vec!["TWILIO_API_KEY", "TWILIO_API_SECRET", "TWILIO_APP_SID"]
        );
    }
}
