//! Read-only Twilio REST API client.
//!
//! Conference state lives entirely with Twilio; this client projects it
//! into the facade's response shapes at query time. No caching, no
//! retries: every failure is terminal for the request that triggered it.

pub mod error;

pub use error::ProviderError;

use serde::{Deserialize, Serialize};

/// Production Twilio REST API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.twilio.com/2010-04-01";

/// Page size bound for conference listings.
pub const CONFERENCE_PAGE_SIZE: u32 = 20;

/// One in-progress conference, projected for the facade.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConferenceSummary {
    pub name: String,
    pub id: String,
    pub participant_count: usize,
    pub created_at: String,
    pub status: String,
}

/// One call leg inside a conference, projected for the facade.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantSummary {
    pub call_leg: String,
    pub label: Option<String>,
    pub joined_at: String,
    pub muted_flag: bool,
}

/// Conference list page as Twilio returns it.
#[derive(Debug, Deserialize)]
struct ConferencePage {
    conferences: Vec<ConferenceResource>,
}

#[derive(Debug, Deserialize)]
struct ConferenceResource {
    sid: String,
    friendly_name: String,
    status: String,
    date_created: String,
}

/// Participant list page as Twilio returns it.
#[derive(Debug, Deserialize)]
struct ParticipantPage {
    participants: Vec<ParticipantResource>,
}

#[derive(Debug, Deserialize)]
struct ParticipantResource {
    call_sid: String,
    label: Option<String>,
    date_created: String,
    muted: bool,
}

/// Thin client over Twilio's conference resources.
#[derive(Debug, Clone)]
pub struct TwilioRestClient {
    http: reqwest::Client,
    base_url: String,
    account_sid: String,
    auth_token: String,
}

impl TwilioRestClient {
    pub fn new(http: reqwest::Client, account_sid: &str, auth_token: &str) -> Self {
        Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            account_sid: account_sid.to_string(),
            auth_token: auth_token.to_string(),
        }
    }

    /// Point the client at a different base URL (mock servers in tests).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, ProviderError> {
        let response = self
            .http
            .get(url)
            .query(query)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout
                } else {
                    ProviderError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(ProviderError::Upstream {
                status: status.as_u16(),
                message: body,
            });
        }

        serde_json::from_str(&body).map_err(|e| ProviderError::InvalidResponse(e.to_string()))
    }

    /// List in-progress conferences, bounded by [`CONFERENCE_PAGE_SIZE`].
    ///
    /// Twilio's conference resource carries no participant count, so each
    /// listed conference costs one sequential participants sub-query.
    pub async fn list_conferences(&self) -> Result<Vec<ConferenceSummary>, ProviderError> {
        let url = format!(
            "{}/Accounts/{}/Conferences.json",
            self.base_url, self.account_sid
        );
        let page: ConferencePage = self
            .get_json(
                &url,
                &[
                    ("Status", "in-progress".to_string()),
                    ("PageSize", CONFERENCE_PAGE_SIZE.to_string()),
                ],
            )
            .await?;

        let mut summaries = Vec::with_capacity(page.conferences.len());
        for conference in page.conferences {
            let participants = self.list_participants(&conference.sid).await?;
            summaries.push(ConferenceSummary {
                name: conference.friendly_name,
                id: conference.sid,
                participant_count: participants.len(),
                created_at: conference.date_created,
                status: conference.status,
            });
        }
        Ok(summaries)
    }

    /// List the call legs currently in a conference.
    pub async fn list_participants(
        &self,
        conference_sid: &str,
    ) -> Result<Vec<ParticipantSummary>, ProviderError> {
        let url = format!(
            "{}/Accounts/{}/Conferences/{}/Participants.json",
            self.base_url, self.account_sid, conference_sid
        );
        let page: ParticipantPage = self.get_json(&url, &[]).await?;

        Ok(page
            .participants
            .into_iter()
            .map(|p| ParticipantSummary {
                call_leg: p.call_sid,
                label: p.label,
                joined_at: p.date_created,
                muted_flag: p.muted,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_serializes_camel_case() {
        let summary = ConferenceSummary {
            name: "standup".to_string(),
            id: "CF123".to_string(),
            participant_count: 2,
            created_at: "Mon, 15 Aug 2022 20:20:10 +0000".to_string(),
            status: "in-progress".to_string(),
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["participantCount"], 2);
        assert_eq!(json["createdAt"], "Mon, 15 Aug 2022 20:20:10 +0000");
    }

    #[test]
    fn test_participant_serializes_camel_case() {
        let summary = ParticipantSummary {
            call_leg: "CA123".to_string(),
            label: None,
            joined_at: "Mon, 15 Aug 2022 20:20:10 +0000".to_string(),
            muted_flag: false,
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["callLeg"], "CA123");
        assert_eq!(json["mutedFlag"], false);
        assert!(json["label"].is_null());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = TwilioRestClient::new(reqwest::Client::new(), "AC1", "tok")
            .with_base_url("http://localhost:1234/");
        assert_eq!(client.base_url, "http://localhost:1234");
    }
}
