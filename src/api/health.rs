//! Health check endpoint handler.

use axum::Json;
use serde::Serialize;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    /// RFC 3339 timestamp of the check.
    pub timestamp: String,
}

/// GET /health - Liveness check.
pub async fn handle() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_timestamp_parses() {
        let response = handle().await;
        assert_eq!(response.status, "ok");
        assert!(chrono::DateTime::parse_from_rfc3339(&response.timestamp).is_ok());
    }
}
