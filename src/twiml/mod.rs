//! TwiML document rendering.
//!
//! TwiML is the declarative XML dialect Twilio's call-control runtime
//! interprets. This module provides a small [`VoiceResponse`] builder for
//! the verbs this service emits (`<Say>` and `<Dial>` with its nouns) and
//! renders a [`RoutingDecision`] into a document.
//!
//! Rendering never fails: every path through this module produces a
//! well-formed document, and [`VoiceResponse::error_document`] is the
//! fallback used when a webhook handler cannot even resolve its input.

use crate::routing::{ConferenceOptions, RoutingDecision, RING_TIMEOUT_SECS};

/// Spoken when a handler fails before a decision could be rendered.
pub const ERROR_MESSAGE: &str =
    "We are sorry, an application error has occurred. Please try again later.";

/// Media type for TwiML responses.
pub const CONTENT_TYPE: &str = "text/xml";

/// A noun nested inside a `<Dial>` verb.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialNoun {
    Client(String),
    Number(String),
    Sip(String),
    Conference {
        name: String,
        options: ConferenceOptions,
    },
}

/// A `<Dial>` verb with its attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dial {
    pub caller_id: Option<String>,
    pub timeout: Option<u32>,
    pub answer_on_bridge: bool,
    pub noun: DialNoun,
}

impl Dial {
    /// A dial with the standard outbound attributes (caller id, ring
    /// timeout, direct media bridging once answered).
    pub fn bridged(caller_id: &str, noun: DialNoun) -> Self {
        Self {
            caller_id: Some(caller_id.to_string()),
            timeout: Some(RING_TIMEOUT_SECS),
            answer_on_bridge: true,
            noun,
        }
    }

    /// A dial with no attributes at all.
    pub fn plain(noun: DialNoun) -> Self {
        Self {
            caller_id: None,
            timeout: None,
            answer_on_bridge: false,
            noun,
        }
    }
}

/// Top-level TwiML verbs this service emits.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Verb {
    Say(String),
    Dial(Dial),
}

/// Builder for a `<Response>` document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoiceResponse {
    verbs: Vec<Verb>,
}

impl VoiceResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a `<Say>` verb.
    pub fn say(&mut self, message: &str) -> &mut Self {
        self.verbs.push(Verb::Say(message.to_string()));
        self
    }

    /// Append a `<Dial>` verb.
    pub fn dial(&mut self, dial: Dial) -> &mut Self {
        self.verbs.push(Verb::Dial(dial));
        self
    }

    /// Append the verbs for a routing decision.
    pub fn push_decision(&mut self, decision: &RoutingDecision) -> &mut Self {
        match decision {
            RoutingDecision::Announce { message } => self.say(message),
            RoutingDecision::DialClient {
                identity,
                caller_id,
            } => self.dial(Dial::bridged(caller_id, DialNoun::Client(identity.clone()))),
            RoutingDecision::DialNumber { number, caller_id } => {
                self.dial(Dial::bridged(caller_id, DialNoun::Number(number.clone())))
            }
            RoutingDecision::DialSip { uri } => self.dial(Dial::plain(DialNoun::Sip(uri.clone()))),
            RoutingDecision::JoinConference { name, options } => {
                self.dial(Dial::plain(DialNoun::Conference {
                    name: name.clone(),
                    options: options.clone(),
                }))
            }
        }
    }

    /// The fallback document for internal failures.
    pub fn error_document() -> Self {
        let mut response = Self::new();
        response.say(ERROR_MESSAGE);
        response
    }

    /// Render the document as XML.
    pub fn to_xml(&self) -> String {
        let mut xml = String::from(r#"<?xml version="1.0" encoding="UTF-8"?><Response>"#);
        for verb in &self.verbs {
            match verb {
                Verb::Say(message) => {
                    xml.push_str("<Say>");
                    xml.push_str(&escape(message));
                    xml.push_str("</Say>");
                }
                Verb::Dial(dial) => render_dial(&mut xml, dial),
            }
        }
        xml.push_str("</Response>");
        xml
    }
}

/// Render a single routing decision as a complete document.
pub fn render(decision: &RoutingDecision) -> VoiceResponse {
    let mut response = VoiceResponse::new();
    response.push_decision(decision);
    response
}

fn render_dial(xml: &mut String, dial: &Dial) {
    xml.push_str("<Dial");
    if let Some(caller_id) = &dial.caller_id {
        xml.push_str(&format!(r#" callerId="{}""#, escape(caller_id)));
    }
    if let Some(timeout) = dial.timeout {
        xml.push_str(&format!(r#" timeout="{}""#, timeout));
    }
    if dial.answer_on_bridge {
        xml.push_str(r#" answerOnBridge="true""#);
    }
    xml.push('>');
    match &dial.noun {
        DialNoun::Client(identity) => {
            xml.push_str("<Client>");
            xml.push_str(&escape(identity));
            xml.push_str("</Client>");
        }
        DialNoun::Number(number) => {
            xml.push_str("<Number>");
            xml.push_str(&escape(number));
            xml.push_str("</Number>");
        }
        DialNoun::Sip(uri) => {
            xml.push_str("<Sip>");
            xml.push_str(&escape(uri));
            xml.push_str("</Sip>");
        }
        DialNoun::Conference { name, options } => {
            xml.push_str(&format!(
                r#"<Conference startConferenceOnEnter="{}" endConferenceOnExit="{}" maxParticipants="{}" waitUrl="{}">"#,
                options.start_on_enter,
                options.end_on_exit,
                options.max_participants,
                escape(&options.hold_music_url),
            ));
            xml.push_str(&escape(name));
            xml.push_str("</Conference>");
        }
    }
    xml.push_str("</Dial>");
}

/// Escape XML-special characters in text and attribute values.
fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
