//! # HTTP API surface
//!
//! Webhook and query endpoints for the Switchboard signaling backend.
//!
//! ## Endpoints
//!
//! - `POST /api/twilio/token` - Issue a Voice SDK access token
//! - `POST /api/twilio/voice` - TwiML for outbound calls
//! - `POST /api/twilio/incoming` - TwiML for inbound calls
//! - `POST /api/twilio/status` - Call-status callback sink (log-only)
//! - `GET /api/twilio/conferences` - In-progress conference list
//! - `GET /api/twilio/conferences/:id/participants` - Conference legs
//! - `GET /health` - Liveness check
//!
//! ## Example
//!
//! ```no_run
//! use switchboard::api::{AppState, create_router};
//! use switchboard::config::SwitchboardConfig;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Arc::new(SwitchboardConfig::default());
//! let state = Arc::new(AppState::new(config));
//! let app = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:9000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! Handlers share an immutable [`AppState`]; there is no cross-request
//! state. Webhook endpoints always answer 200 with TwiML (including a
//! fallback apology document on internal failure); JSON endpoints answer
//! `{"error": ...}` envelopes on failure.

mod conferences;
mod error;
mod health;
mod incoming;
mod status;
mod token;
mod voice;

pub use error::{ApiError, ApiErrorBody};
pub use incoming::{UNAVAILABLE_MESSAGE, WELCOME_MESSAGE};
pub use token::{TokenRequest, TokenResponse};

use crate::config::SwitchboardConfig;
use crate::provider::TwilioRestClient;
use crate::twiml;
use axum::http::{header, HeaderValue, Method};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Maximum request body size (64 KB; webhook payloads are small).
const MAX_BODY_SIZE: usize = 64 * 1024;

/// Shared application state accessible to all handlers.
pub struct AppState {
    pub config: Arc<SwitchboardConfig>,
    pub provider: TwilioRestClient,
}

impl AppState {
    /// Create new application state with the given configuration.
    pub fn new(config: Arc<SwitchboardConfig>) -> Self {
        let timeout_secs = config.server.request_timeout_seconds;

        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .pool_max_idle_per_host(10)
            .build()
            .expect("Failed to create HTTP client");

        let provider = TwilioRestClient::new(
            http_client,
            &config.twilio.account_sid,
            &config.twilio.auth_token,
        );

        Self { config, provider }
    }

    /// State whose provider client targets `base_url` (mock servers in tests).
    pub fn with_provider_base_url(config: Arc<SwitchboardConfig>, base_url: &str) -> Self {
        let mut state = Self::new(config);
        state.provider = state.provider.with_base_url(base_url);
        state
    }
}

/// Create the main API router with all endpoints configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/api/twilio/token", post(token::handle))
        .route("/api/twilio/voice", post(voice::handle))
        .route("/api/twilio/incoming", post(incoming::handle))
        .route("/api/twilio/status", post(status::handle))
        .route("/api/twilio/conferences", get(conferences::list))
        .route(
            "/api/twilio/conferences/:id/participants",
            get(conferences::participants),
        )
        .route("/health", get(health::handle))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        // Oversized bodies are refused here with a plain 413 before any
        // handler runs; the TwiML contract covers handler output only
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .with_state(state)
}

/// TwiML response with the provider's expected content type.
pub(crate) fn xml_response(xml: String) -> Response {
    (
        [(header::CONTENT_TYPE, twiml::CONTENT_TYPE)],
        xml,
    )
        .into_response()
}

fn cors_layer(config: &SwitchboardConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors
        .allowed_origins()
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}
