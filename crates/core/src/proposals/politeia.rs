//! Politeia active-vote API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use super::{ProposalError, ProposalSource, Vote};
use crate::config::ProposalsConfig;

/// Politeia API client.
pub struct PoliteiaClient {
    client: Client,
    active_votes_url: String,
}

impl PoliteiaClient {
    pub fn new(config: &ProposalsConfig) -> Result<Self, ProposalError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()?;

        Ok(Self {
            client,
            active_votes_url: config.active_votes_url.clone(),
        })
    }
}

#[async_trait]
impl ProposalSource for PoliteiaClient {
    async fn active_votes(&self) -> Result<Vec<Vote>, ProposalError> {
        debug!("Politeia active votes: {}", self.active_votes_url);

        let response = self.client.get(&self.active_votes_url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProposalError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let reply: ActiveVoteReply = response.json().await.map_err(|e| {
            ProposalError::ParseError(format!("Failed to parse active votes response: {}", e))
        })?;

        let votes: Vec<Vote> = reply
            .votes
            .unwrap_or_default()
            .into_iter()
            .map(Into::into)
            .collect();
        info!("Got {} active votes", votes.len());
        Ok(votes)
    }
}

// Politeia API response types

#[derive(Debug, Deserialize)]
struct ActiveVoteReply {
    votes: Option<Vec<ProposalVoteTuple>>,
}

#[derive(Debug, Deserialize)]
struct ProposalVoteTuple {
    proposal: ProposalRecord,
    startvote: StartVote,
    startvotereply: StartVoteReply,
}

#[derive(Debug, Deserialize)]
struct ProposalRecord {
    name: String,
}

#[derive(Debug, Deserialize)]
struct StartVote {
    vote: VoteParams,
}

#[derive(Debug, Deserialize)]
struct VoteParams {
    token: String,
}

#[derive(Debug, Deserialize)]
struct StartVoteReply {
    #[serde(default)]
    eligibletickets: Vec<String>,
}

impl From<ProposalVoteTuple> for Vote {
    fn from(t: ProposalVoteTuple) -> Self {
        Self {
            token: t.startvote.vote.token,
            proposal_name: t.proposal.name,
            eligible_tickets: t.startvotereply.eligibletickets,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(url: String) -> PoliteiaClient {
        PoliteiaClient::new(&ProposalsConfig {
            active_votes_url: url,
            web_url: "http://localhost/proposals".to_string(),
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_active_votes_parsed() {
        let server = MockServer::start().await;

        let body = serde_json::json!({
            "votes": [
                {
                    "proposal": {"name": "Decentralized Treasury", "status": 4},
                    "startvote": {"publickey": "pk", "vote": {"token": "tok1", "mask": 3}},
                    "startvotereply": {"startblockheight": "1", "eligibletickets": ["t1", "t2"]}
                },
                {
                    "proposal": {"name": "Bug Bounty"},
                    "startvote": {"vote": {"token": "tok2"}},
                    "startvotereply": {"eligibletickets": []}
                }
            ]
        });

        Mock::given(method("GET"))
            .and(path("/api/v1/proposals/activevote"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let client = test_client(format!("{}/api/v1/proposals/activevote", server.uri()));
        let votes = client.active_votes().await.unwrap();
        assert_eq!(votes.len(), 2);
        assert_eq!(votes[0].token, "tok1");
        assert_eq!(votes[0].proposal_name, "Decentralized Treasury");
        assert_eq!(votes[0].eligible_tickets, vec!["t1", "t2"]);
        assert!(votes[1].eligible_tickets.is_empty());
    }

    #[tokio::test]
    async fn test_null_votes_reads_empty() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"votes": null})),
            )
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        assert!(client.active_votes().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_server_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        let err = client.active_votes().await.unwrap_err();
        assert!(matches!(err, ProposalError::ApiError { status: 503, .. }));
    }
}
