//! Testing utilities and mock implementations.
//!
//! This module provides mock implementations of every external service
//! trait and an in-memory state store, allowing watcher runs to be tested
//! without network access or files.
//!
//! # Example
//!
//! ```rust,ignore
//! use ticketwatch_core::testing::{fixtures, MemoryStateStore, MockExplorer};
//!
//! let store = MemoryStateStore::with_tickets(&["T1", "T2"]);
//! let explorer = MockExplorer::new();
//!
//! explorer.set_ticket("T1", fixtures::live_ticket()).await;
//! explorer.set_ticket("T2", fixtures::voted_ticket(1000)).await;
//! explorer.set_height(1200).await;
//! ```

mod memory_store;
mod mock_explorer;
mod mock_proposals;
mod mock_sender;

pub use memory_store::MemoryStateStore;
pub use mock_explorer::{MockExplorer, RecordedExplorerCall};
pub use mock_proposals::MockProposalSource;
pub use mock_sender::{MockMessageSender, SentMessage};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::config::ChatDestinations;
    use crate::explorer::{TicketInfo, TicketStatus};
    use crate::proposals::Vote;
    use crate::watcher::WatcherConfig;

    pub fn immature_ticket() -> TicketInfo {
        TicketInfo::new(TicketStatus::Immature)
    }

    pub fn live_ticket() -> TicketInfo {
        TicketInfo::new(TicketStatus::Live)
    }

    /// A ticket that voted in the block at `height`.
    pub fn voted_ticket(height: u64) -> TicketInfo {
        TicketInfo::new(TicketStatus::Voted).with_lottery_height(height)
    }

    /// A ticket that missed its vote in the block at `height`.
    pub fn missed_ticket(height: u64) -> TicketInfo {
        TicketInfo::new(TicketStatus::Missed).with_lottery_height(height)
    }

    /// A ticket that expired at `height`.
    pub fn expired_ticket(height: u64) -> TicketInfo {
        TicketInfo::new(TicketStatus::Expired).with_expiration_height(height)
    }

    /// An active vote on proposal `name`.
    pub fn vote(token: &str, name: &str, eligible: &[&str]) -> Vote {
        Vote {
            token: token.to_string(),
            proposal_name: name.to_string(),
            eligible_tickets: eligible.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Watcher settings for a single chat, UTC, all features off.
    pub fn watcher_config() -> WatcherConfig {
        WatcherConfig {
            chat_ids: ChatDestinations::from("100"),
            utc_offset: 0,
            vote_eligibility: false,
            delete_old: false,
            proposals_web_url: "https://proposals.decred.org/proposals".to_string(),
        }
    }
}
