//! Types for the watcher.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{ChatDestinations, Config};
use crate::explorer::TicketStatus;

/// Errors that abort a watcher run.
///
/// Network failures never show up here: they are logged and the affected
/// ticket or vote is retried on the next run.
#[derive(Debug, Error)]
pub enum WatcherError {
    /// State store error.
    #[error("state store error: {0}")]
    State(#[from] crate::state::StateError),
}

/// Settings the watcher needs from the configuration.
#[derive(Debug, Clone)]
pub struct WatcherConfig {
    pub chat_ids: ChatDestinations,
    pub utc_offset: i32,
    pub vote_eligibility: bool,
    pub delete_old: bool,
    /// Proposal page prefix used for links in eligibility messages.
    pub proposals_web_url: String,
}

impl From<&Config> for WatcherConfig {
    fn from(config: &Config) -> Self {
        Self {
            chat_ids: config.telegram.chat_ids.clone(),
            utc_offset: config.utc_offset,
            vote_eligibility: config.vote_eligibility,
            delete_old: config.delete_old,
            proposals_web_url: config.proposals.web_url.clone(),
        }
    }
}

/// A ticket that reached a terminal status during this run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketEvent {
    pub ticket_id: String,
    pub status: TicketStatus,
    /// Formatted maturity estimate, absent when it could not be computed.
    pub maturity: Option<String>,
}

/// Tracked tickets newly eligible to vote on a proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteEligibility {
    pub token: String,
    pub proposal_name: String,
    pub eligible: usize,
}

/// Outcome of one watcher run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// True when the ticket store was empty and nothing was checked.
    pub skipped: bool,
    pub events: Vec<TicketEvent>,
    pub eligibilities: Vec<VoteEligibility>,
    /// Tickets left in the store for the next run.
    pub tickets_kept: usize,
    /// Chats the notification reached.
    pub messages_sent: usize,
    /// Old messages deleted before notifying.
    pub messages_deleted: usize,
}
