//! Governance proposal votes.
//!
//! Lists the proposals currently being voted on together with the tickets
//! eligible to vote on each.

mod politeia;

pub use politeia::PoliteiaClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when querying the proposal system.
#[derive(Debug, Error)]
pub enum ProposalError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// API returned a non-success status.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// A proposal vote in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    /// Proposal censorship token, unique per proposal.
    pub token: String,
    pub proposal_name: String,
    /// Tickets allowed to vote on this proposal.
    pub eligible_tickets: Vec<String>,
}

impl Vote {
    /// Number of the given tickets that may vote on this proposal.
    pub fn count_eligible<S: AsRef<str>>(&self, tickets: &[S]) -> usize {
        tickets
            .iter()
            .filter(|t| self.eligible_tickets.iter().any(|e| e == t.as_ref()))
            .count()
    }
}

/// Trait for proposal vote sources.
#[async_trait]
pub trait ProposalSource: Send + Sync {
    /// Fetch every vote currently open.
    async fn active_votes(&self) -> Result<Vec<Vote>, ProposalError>;
}
