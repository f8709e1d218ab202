//! Inbound-call webhook handler.

use crate::api::xml_response;
use crate::routing::{self, CallParams, CallRequest};
use crate::twiml;
use axum::body::Bytes;
use axum::extract::RawQuery;
use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderMap;
use axum::response::Response;
use tracing::{info, warn};

/// Greeting spoken before the dial on the inbound path.
pub const WELCOME_MESSAGE: &str = "Incoming call to the VOIP application.";

/// Trailing announcement, reached only if Twilio's runtime continues past
/// an unanswered or failed dial.
pub const UNAVAILABLE_MESSAGE: &str =
    "The person you are trying to reach is currently unavailable.";

/// POST /api/twilio/incoming - Render TwiML for an inbound call.
///
/// Destination defaults to the support client. The document is always
/// greeting, dial, then the unavailable announcement as a no-answer
/// fallback for Twilio's runtime to reach on its own. As on the outbound
/// path, query and body parsing happen inside the handler so malformed
/// input yields the apology document, never a raw error.
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
            warn!(error = %e, "Unparseable incoming webhook input");
            return xml_response(twiml::VoiceResponse::error_document().to_xml());
        }
    };

    let request = CallRequest::resolve(&params, &query);
    info!(
        to = ?request.destination,
        from = ?request.origin,
        call_sid = ?request.call_sid,
        "Incoming call"
    );

    let decision =
        routing::decide_inbound(request.destination.as_deref(), request.origin.as_deref());

    let mut response = twiml::VoiceResponse::new();
    response
        .say(WELCOME_MESSAGE)
        .push_decision(&decision)
        .say(UNAVAILABLE_MESSAGE);
    xml_response(response.to_xml())
}
