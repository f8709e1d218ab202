//! Outbound-call webhook handler.

use crate::api::xml_response;
use crate::routing::{self, CallParams, CallRequest};
use crate::twiml;
use axum::body::Bytes;
use axum::extract::RawQuery;
use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderMap;
use axum::response::Response;
use tracing::{info, warn};

/// POST /api/twilio/voice - Render TwiML for an outbound call.
///
/// Always answers 200 with a well-formed TwiML document. The query string
/// and body are parsed inside the handler (not by an extractor that could
/// reject first), so malformed input still yields the apology fallback
/// rather than a raw error.
pub async fn handle(
    RawQuery(raw_query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let content_type = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok());
    let parsed = CallParams::from_body(content_type, &body)
        .and_then(|params| Ok((params, CallParams::from_query(raw_query.as_deref())?)));
    let (params, query) = match parsed {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!(error = %e, "Unparseable voice webhook input");
            return xml_response(twiml::VoiceResponse::error_document().to_xml());
        }
    };

    let request = CallRequest::resolve(&params, &query);
    info!(to = ?request.destination, from = ?request.origin, "Voice request");

    let decision = routing::decide(request.destination.as_deref(), request.origin.as_deref());
    xml_response(twiml::render(&decision).to_xml())
}
