//! Types returned by the block explorer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle status of a staking ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TicketStatus {
    Immature,
    Live,
    Voted,
    Missed,
    Expired,
    /// Any status the explorer reports that is not modelled above.
    Unknown(String),
}

impl TicketStatus {
    /// Whether the ticket is still waiting to be called to vote.
    pub fn is_pre_vote(&self) -> bool {
        matches!(self, TicketStatus::Immature | TicketStatus::Live)
    }

    pub fn as_str(&self) -> &str {
        match self {
            TicketStatus::Immature => "immature",
            TicketStatus::Live => "live",
            TicketStatus::Voted => "voted",
            TicketStatus::Missed => "missed",
            TicketStatus::Expired => "expired",
            TicketStatus::Unknown(s) => s,
        }
    }
}

impl From<String> for TicketStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "immature" => TicketStatus::Immature,
            "live" => TicketStatus::Live,
            "voted" => TicketStatus::Voted,
            "missed" => TicketStatus::Missed,
            "expired" => TicketStatus::Expired,
            _ => TicketStatus::Unknown(s),
        }
    }
}

impl From<TicketStatus> for String {
    fn from(status: TicketStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Block a ticket was selected in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotteryBlock {
    pub height: u64,
    #[serde(default)]
    pub hash: Option<String>,
}

/// Ticket information as reported by the `tinfo` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketInfo {
    pub status: TicketStatus,
    /// Present once the ticket was called to vote (voted or missed).
    #[serde(default)]
    pub lottery_block: Option<LotteryBlock>,
    /// Present for expired tickets.
    #[serde(default)]
    pub expiration_height: Option<u64>,
}

impl TicketInfo {
    pub fn new(status: TicketStatus) -> Self {
        Self {
            status,
            lottery_block: None,
            expiration_height: None,
        }
    }

    pub fn with_lottery_height(mut self, height: u64) -> Self {
        self.lottery_block = Some(LotteryBlock { height, hash: None });
        self
    }

    pub fn with_expiration_height(mut self, height: u64) -> Self {
        self.expiration_height = Some(height);
        self
    }

    /// Height of the block that resolved the ticket, if the status has one.
    pub fn event_height(&self) -> Option<u64> {
        match self.status {
            TicketStatus::Voted | TicketStatus::Missed => {
                self.lottery_block.as_ref().map(|b| b.height)
            }
            TicketStatus::Expired => self.expiration_height,
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct BestBlock {
    pub height: u64,
}
