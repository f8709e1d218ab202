//! Error types for Twilio REST operations.

use thiserror::Error;

/// Errors that can occur while querying the Twilio REST API.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Network connectivity error (DNS, connection refused, etc.).
    #[error("Network error: {0}")]
    Network(String),

    /// Request exceeded the shared client's deadline.
    #[error("Request timeout")]
    Timeout,

    /// Twilio returned an error response (4xx, 5xx).
    #[error("Twilio API error {status}: {message}")]
    Upstream { status: u16, message: String },

    /// Twilio's response doesn't match the expected format.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
