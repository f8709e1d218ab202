//! Cross-origin configuration for the browser client

use serde::{Deserialize, Serialize};

/// CORS configuration.
///
/// The browser client's origin is allowed alongside the fixed local
/// development origins.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Deployed client URL; its origin is added to the allow list.
    pub client_url: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            client_url: "http://localhost:5173".to_string(),
        }
    }
}

impl CorsConfig {
    /// Full list of allowed origins (dev origins plus the client URL).
    pub fn allowed_origins(&self) -> Vec<String> {
        let mut origins = vec![
            "http://localhost:3000".to_string(),
            "http://localhost:5173".to_string(),
        ];
        if !self.client_url.is_empty() && !origins.contains(&self.client_url) {
            origins.push(self.client_url.clone());
        }
        origins
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_defaults() {
        let config = CorsConfig::default();
        assert_eq!(config.client_url, "http://localhost:5173");
        // Default client URL is already a dev origin; no duplicate entry
        assert_eq!(config.allowed_origins().len(), 2);
    }

    #[test]
    fn test_cors_custom_client_url() {
        let config = CorsConfig {
            client_url: "https://app.example.com".to_string(),
        };
        let origins = config.allowed_origins();
        assert_eq!(origins.len(), 3);
        assert!(origins.contains(&"https://app.example.com".to_string()));
    }
}
