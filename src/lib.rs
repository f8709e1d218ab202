//! Switchboard: signaling backend for a browser voice-calling app built
//! on Twilio Programmable Voice. Issues Voice SDK access tokens, answers
//! call webhooks with TwiML, and exposes read-only conference queries.

pub mod api;
pub mod cli;
pub mod config;
pub mod provider;
pub mod routing;
pub mod token;
pub mod twiml;
