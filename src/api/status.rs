//! Call-status callback sink.

use axum::body::Bytes;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, StatusCode};
use serde::Deserialize;
use tracing::info;

/// Fields of interest from a status callback. Twilio sends many more;
/// the rest are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct StatusCallback {
    #[serde(rename = "CallSid")]
    pub call_sid: Option<String>,
    #[serde(rename = "CallStatus")]
    pub call_status: Option<String>,
    #[serde(rename = "CallDuration")]
    pub call_duration: Option<String>,
}

/// POST /api/twilio/status - Log the callback and acknowledge.
///
/// Log-only; always 200 with an empty body, even for bodies that don't
/// parse.
pub async fn handle(headers: HeaderMap, body: Bytes) -> StatusCode {
    let content_type = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok());
    let is_json = content_type
        .map(|ct| ct.contains("application/json"))
        .unwrap_or(false);

    let callback: StatusCallback = if body.is_empty() {
        StatusCallback::default()
    } else if is_json {
        serde_json::from_slice(&body).unwrap_or_default()
    } else {
        serde_urlencoded::from_bytes(&body).unwrap_or_default()
    };

    info!(
        call_sid = ?callback.call_sid,
        call_status = ?callback.call_status,
        call_duration = ?callback.call_duration,
        "Call status update"
    );
    StatusCode::OK
}
