//! Access-token endpoint handler.

use crate::api::{ApiError, AppState};
use crate::token;
use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Debug, Default, Deserialize)]
pub struct TokenRequest {
    pub identity: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub identity: String,
}

/// POST /api/twilio/token - Issue a Voice SDK access token.
///
/// An absent or empty body is allowed and issues a token for the default
/// identity.
pub async fn handle(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<TokenResponse>, ApiError> {
    let request: TokenRequest = if body.is_empty() {
        TokenRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|_| ApiError::bad_request("Invalid request body"))?
    };

    let identity = token::resolve_identity(request.identity.as_deref());
    info!(identity = %identity, "Issuing access token");

    match token::issue(&state.config.twilio, &identity) {
        Ok(token) => Ok(Json(TokenResponse { token, identity })),
        Err(e) => {
            error!(error = %e, "Error generating token");
            Err(ApiError::internal("Failed to generate token"))
        }
    }
}
