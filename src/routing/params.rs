//! Webhook parameter resolution.
//!
//! Twilio posts webhook parameters as a urlencoded form; the browser
//! client posts JSON; either may also carry them in the query string, and
//! some clients send lowercase field names. Resolution per field is
//! first-non-empty with precedence: body PascalCase, then query
//! PascalCase, then body lowercase.

use serde::Deserialize;
use thiserror::Error;

/// Raw webhook parameters as they appear in one source (body or query).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CallParams {
    #[serde(rename = "To")]
    pub to: Option<String>,
    #[serde(rename = "From")]
    pub from: Option<String>,
    #[serde(rename = "CallSid")]
    pub call_sid: Option<String>,
    #[serde(rename = "to")]
    pub to_lower: Option<String>,
    #[serde(rename = "from")]
    pub from_lower: Option<String>,
}

/// Body parsing failures.
///
/// Webhook handlers treat these as an internal failure and fall back to
/// the TwiML apology document rather than surfacing a raw error.
#[derive(Debug, Error)]
pub enum ParamsError {
    #[error("Invalid JSON body: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid form body: {0}")]
    Form(#[from] serde_urlencoded::de::Error),
}

impl CallParams {
    /// Parse a query string.
    ///
    /// An absent or empty query is valid and yields no parameters.
    pub fn from_query(query: Option<&str>) -> Result<Self, ParamsError> {
        match query {
            Some(q) if !q.is_empty() => Ok(serde_urlencoded::from_str(q)?),
            _ => Ok(Self::default()),
        }
    }

    /// Parse a request body by content type.
    ///
    /// An empty body is valid and yields no parameters, matching a
    /// webhook sent without any form fields.
    pub fn from_body(content_type: Option<&str>, body: &[u8]) -> Result<Self, ParamsError> {
        if body.is_empty() {
            return Ok(Self::default());
        }
        let is_json = content_type
            .map(|ct| ct.contains("application/json"))
            .unwrap_or(false);
        if is_json {
            Ok(serde_json::from_slice(body)?)
        } else {
            Ok(serde_urlencoded::from_bytes(body)?)
        }
    }
}

/// The resolved, request-scoped view of a call webhook.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallRequest {
    pub destination: Option<String>,
    pub origin: Option<String>,
    pub call_sid: Option<String>,
}

impl CallRequest {
    /// Merge body and query parameters with the documented precedence.
    pub fn resolve(body: &CallParams, query: &CallParams) -> Self {
        Self {
            destination: first_non_empty(&[&body.to, &query.to, &body.to_lower]),
            origin: first_non_empty(&[&body.from, &query.from, &body.from_lower]),
            call_sid: first_non_empty(&[&body.call_sid, &query.call_sid]),
        }
    }
}

fn first_non_empty(candidates: &[&Option<String>]) -> Option<String> {
    candidates
        .iter()
        .filter_map(|c| c.as_deref())
        .find(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_form_body() {
        let params =
            CallParams::from_body(Some("application/x-www-form-urlencoded"), b"To=client%3Aalice&From=%2B15550001111").unwrap();
        assert_eq!(params.to.as_deref(), Some("client:alice"));
        assert_eq!(params.from.as_deref(), Some("+15550001111"));
    }

    #[test]
    fn test_parse_json_body() {
        let params = CallParams::from_body(
            Some("application/json"),
            br#"{"To": "client:alice", "CallSid": "CA123"}"#,
        )
        .unwrap();
        assert_eq!(params.to.as_deref(), Some("client:alice"));
        assert_eq!(params.call_sid.as_deref(), Some("CA123"));
    }

    #[test]
    fn test_parse_empty_body() {
        let params = CallParams::from_body(None, b"").unwrap();
        assert!(params.to.is_none());
        assert!(params.from.is_none());
    }

    #[test]
    fn test_parse_query_string() {
        let params = CallParams::from_query(Some("To=client%3Aalice&From=client%3Abob")).unwrap();
        assert_eq!(params.to.as_deref(), Some("client:alice"));
        assert_eq!(params.from.as_deref(), Some("client:bob"));
    }

    #[test]
    fn test_parse_absent_query() {
        let params = CallParams::from_query(None).unwrap();
        assert!(params.to.is_none());
        let params = CallParams::from_query(Some("")).unwrap();
        assert!(params.to.is_none());
    }

    #[test]
    fn test_parse_duplicate_query_field_errors() {
        let result = CallParams::from_query(Some("To=client%3Aa&To=client%3Ab"));
        assert!(matches!(result, Err(ParamsError::Form(_))));
    }

    #[test]
    fn test_parse_invalid_json_errors() {
        let result = CallParams::from_body(Some("application/json"), b"{not json");
        assert!(matches!(result, Err(ParamsError::Json(_))));
    }

    #[test]
    fn test_resolve_body_pascal_wins() {
        let body = CallParams {
            to: Some("client:body".to_string()),
            to_lower: Some("client:lower".to_string()),
            ..CallParams::default()
        };
        let query = CallParams {
            to: Some("client:query".to_string()),
            ..CallParams::default()
        };
        let request = CallRequest::resolve(&body, &query);
        assert_eq!(request.destination.as_deref(), Some("client:body"));
    }

    #[test]
    fn test_resolve_query_beats_lowercase_body() {
        let body = CallParams {
            to_lower: Some("client:lower".to_string()),
            ..CallParams::default()
        };
        let query = CallParams {
            to: Some("client:query".to_string()),
            ..CallParams::default()
        };
        let request = CallRequest::resolve(&body, &query);
        assert_eq!(request.destination.as_deref(), Some("client:query"));
    }

    #[test]
    fn test_resolve_empty_string_skipped() {
        let body = CallParams {
            to: Some(String::new()),
            to_lower: Some("client:lower".to_string()),
            ..CallParams::default()
        };
        let request = CallRequest::resolve(&body, &CallParams::default());
        assert_eq!(request.destination.as_deref(), Some("client:lower"));
    }

    #[test]
    fn test_resolve_all_absent() {
        let request = CallRequest::resolve(&CallParams::default(), &CallParams::default());
        assert_eq!(request, CallRequest::default());
    }
}
