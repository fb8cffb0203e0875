//! Block explorer integration.
//!
//! Looks up the status of individual staking tickets and the current chain
//! height.

mod dcrdata;
mod types;

pub use dcrdata::DcrdataClient;
pub use types::{LotteryBlock, TicketInfo, TicketStatus};

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when querying the explorer.
#[derive(Debug, Error)]
pub enum ExplorerError {
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

/// Trait for block explorer clients.
#[async_trait]
pub trait TicketExplorer: Send + Sync {
    /// Fetch the current status of a ticket.
    async fn ticket_info(&self, ticket_id: &str) -> Result<TicketInfo, ExplorerError>;

    /// Fetch the height of the best block.
    async fn best_block_height(&self) -> Result<u64, ExplorerError>;
}
