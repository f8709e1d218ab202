//! Call-routing decision engine.
//!
//! Destination strings are parsed into a tagged [`RoutingDecision`] before
//! any TwiML is rendered, so every request resolves to exactly one terminal
//! action and the renderer can match exhaustively.
//!
//! Dispatch is by destination prefix, first match wins:
//!
//! 1. absent/empty destination → announce the missing-destination message
//! 2. `conference:` → join a named conference with fixed options
//! 3. `client:` → dial a browser client by identity
//! 4. `sip:` → dial a SIP URI (passed through verbatim)
//! 5. anything else → dial it as a phone number

pub mod params;

pub use params::{CallParams, CallRequest, ParamsError};

/// Caller id sentinel when the origin is wholly absent.
pub const ANONYMOUS_CALLER: &str = "client:anonymous";

/// Identity dialed for inbound calls with no destination.
pub const INBOUND_FALLBACK_IDENTITY: &str = "support";

/// Ring timeout for bridged dials, in seconds.
pub const RING_TIMEOUT_SECS: u32 = 20;

/// Announced when an outbound request carries no destination.
pub const MISSING_DESTINATION_MESSAGE: &str =
    "Thanks for calling. Please specify a valid destination.";

/// Hold music played to conference participants waiting for the call to start.
pub const HOLD_MUSIC_URL: &str = "http://twimlets.com/holdmusic?Bucket=com.twilio.music.classical";

/// Fixed options applied to every conference join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConferenceOptions {
    pub start_on_enter: bool,
    pub end_on_exit: bool,
    pub max_participants: u32,
    pub hold_music_url: String,
}

impl Default for ConferenceOptions {
    fn default() -> Self {
        Self {
            start_on_enter: true,
            end_on_exit: false,
            max_participants: 10,
            hold_music_url: HOLD_MUSIC_URL.to_string(),
        }
    }
}

/// The single terminal action chosen for a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutingDecision {
    /// Speak a message and hang up.
    Announce { message: String },
    /// Bridge to a browser client registered under `identity`.
    DialClient { identity: String, caller_id: String },
    /// Bridge to a SIP endpoint; the URI is not rewritten.
    DialSip { uri: String },
    /// Bridge to a PSTN number.
    DialNumber { number: String, caller_id: String },
    /// Join a named conference room.
    JoinConference {
        name: String,
        options: ConferenceOptions,
    },
}

/// Resolve the caller id, falling back to the anonymous sentinel.
fn resolve_caller_id(origin: Option<&str>) -> String {
    match origin {
        Some(o) if !o.is_empty() => o.to_string(),
        _ => ANONYMOUS_CALLER.to_string(),
    }
}

/// Decide the routing action for an outbound call.
pub fn decide(destination: Option<&str>, origin: Option<&str>) -> RoutingDecision {
    let caller_id = resolve_caller_id(origin);

    let destination = match destination {
        Some(d) if !d.is_empty() => d,
        _ => {
            return RoutingDecision::Announce {
                message: MISSING_DESTINATION_MESSAGE.to_string(),
            }
        }
    };

    if let Some(name) = destination.strip_prefix("conference:") {
        RoutingDecision::JoinConference {
            name: name.to_string(),
            options: ConferenceOptions::default(),
        }
    } else if let Some(identity) = destination.strip_prefix("client:") {
        RoutingDecision::DialClient {
            identity: identity.to_string(),
            caller_id,
        }
    } else if destination.starts_with("sip:") {
        RoutingDecision::DialSip {
            uri: destination.to_string(),
        }
    } else {
        RoutingDecision::DialNumber {
            number: destination.to_string(),
            caller_id,
        }
    }
}

/// Decide the routing action for an inbound call.
///
/// Same decision table as [`decide`], except an absent destination routes
/// to the fixed support client instead of an announcement.
pub fn decide_inbound(destination: Option<&str>, origin: Option<&str>) -> RoutingDecision {
    match destination {
        Some(d) if !d.is_empty() => decide(Some(d), origin),
        _ => RoutingDecision::DialClient {
            identity: INBOUND_FALLBACK_IDENTITY.to_string(),
            caller_id: resolve_caller_id(origin),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_prefix() {
        let decision = decide(Some("client:alice"), Some("client:bob"));
        assert_eq!(
            decision,
            RoutingDecision::DialClient {
                identity: "alice".to_string(),
                caller_id: "client:bob".to_string(),
            }
        );
    }

    #[test]
    fn test_client_prefix_anonymous_origin() {
        let decision = decide(Some("client:alice"), None);
        assert_eq!(
            decision,
            RoutingDecision::DialClient {
                identity: "alice".to_string(),
                caller_id: ANONYMOUS_CALLER.to_string(),
            }
        );
    }

    #[test]
    fn test_empty_origin_is_anonymous() {
        let decision = decide(Some("client:alice"), Some(""));
        assert!(matches!(
            decision,
            RoutingDecision::DialClient { caller_id, .. } if caller_id == ANONYMOUS_CALLER
        ));
    }

    #[test]
    fn test_sip_prefix_kept_verbatim() {
        let decision = decide(Some("sip:alice@example.com"), Some("client:bob"));
        assert_eq!(
            decision,
            RoutingDecision::DialSip {
                uri: "sip:alice@example.com".to_string(),
            }
        );
    }

    #[test]
    fn test_conference_prefix_fixed_options() {
        let decision = decide(Some("conference:standup"), None);
        assert_eq!(
            decision,
            RoutingDecision::JoinConference {
                name: "standup".to_string(),
                options: ConferenceOptions {
                    start_on_enter: true,
                    end_on_exit: false,
                    max_participants: 10,
                    hold_music_url: HOLD_MUSIC_URL.to_string(),
                },
            }
        );
    }

    #[test]
    fn test_bare_destination_is_phone_number() {
        let decision = decide(Some("+15551234567"), Some("client:bob"));
        assert_eq!(
            decision,
            RoutingDecision::DialNumber {
                number: "+15551234567".to_string(),
                caller_id: "client:bob".to_string(),
            }
        );
    }

    #[test]
    fn test_missing_destination_announces() {
        for destination in [None, Some("")] {
            let decision = decide(destination, Some("client:bob"));
            assert_eq!(
                decision,
                RoutingDecision::Announce {
                    message: MISSING_DESTINATION_MESSAGE.to_string(),
                }
            );
        }
    }

    #[test]
    fn test_prefix_order_conference_before_client() {
        // "conference:" wins even though a client id could contain colons
        let decision = decide(Some("conference:client:weird"), None);
        assert!(matches!(
            decision,
            RoutingDecision::JoinConference { name, .. } if name == "client:weird"
        ));
    }

    #[test]
    fn test_inbound_missing_destination_dials_support() {
        let decision = decide_inbound(None, None);
        assert_eq!(
            decision,
            RoutingDecision::DialClient {
                identity: INBOUND_FALLBACK_IDENTITY.to_string(),
                caller_id: ANONYMOUS_CALLER.to_string(),
            }
        );
    }

    #[test]
    fn test_inbound_with_destination_uses_decision_table() {
        let decision = decide_inbound(Some("client:desk"), Some("+15550001111"));
        assert_eq!(
            decision,
            RoutingDecision::DialClient {
                identity: "desk".to_string(),
                caller_id: "+15550001111".to_string(),
            }
        );
    }
}
