//! Conference introspection handlers.
//!
//! Read-only passthrough to Twilio; responses reflect provider state at
//! query time, nothing is cached.

use crate::api::{ApiError, AppState};
use crate::provider::{ConferenceSummary, ParticipantSummary};
use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use std::sync::Arc;
use tracing::error;

#[derive(Debug, Serialize)]
pub struct ConferencesResponse {
    pub conferences: Vec<ConferenceSummary>,
}

#[derive(Debug, Serialize)]
pub struct ParticipantsResponse {
    pub participants: Vec<ParticipantSummary>,
}

/// GET /api/twilio/conferences - List in-progress conferences.
pub async fn list(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ConferencesResponse>, ApiError> {
    match state.provider.list_conferences().await {
        Ok(conferences) => Ok(Json(ConferencesResponse { conferences })),
        Err(e) => {
            error!(error = %e, "Error fetching conferences");
            Err(ApiError::internal("Failed to fetch conferences"))
        }
    }
}

/// GET /api/twilio/conferences/:id/participants - List a conference's legs.
///
/// A blank id is rejected before any provider call.
pub async fn participants(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ParticipantsResponse>, ApiError> {
    if id.trim().is_empty() {
        return Err(ApiError::bad_request("Conference id is required"));
    }

    match state.provider.list_participants(&id).await {
        Ok(participants) => Ok(Json(ParticipantsResponse { participants })),
        Err(e) => {
            error!(error = %e, conference_sid = %id, "Error fetching participants");
            Err(ApiError::internal("Failed to fetch participants"))
        }
    }
}
