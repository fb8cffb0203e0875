//! Mock block explorer for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::explorer::{ExplorerError, TicketExplorer, TicketInfo};

/// A recorded explorer request for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedExplorerCall {
    TicketInfo { ticket_id: String },
    BestBlockHeight,
}

/// Mock implementation of the TicketExplorer trait.
///
/// Provides controllable behavior for testing:
/// - Return configured ticket infos (unknown tickets answer 404)
/// - Return a configured chain height, or fail when none is set
/// - Track requests for assertions
///
/// # Example
///
/// ```rust,ignore
/// use ticketwatch_core::testing::{MockExplorer, fixtures};
///
/// let explorer = MockExplorer::new();
/// explorer.set_ticket("T1", fixtures::live_ticket()).await;
/// explorer.set_height(1200).await;
///
/// let info = explorer.ticket_info("T1").await?;
/// assert!(info.status.is_pre_vote());
/// ```
#[derive(Debug, Default)]
pub struct MockExplorer {
    /// Ticket infos by ticket id.
    tickets: Arc<RwLock<HashMap<String, TicketInfo>>>,
    /// Best block height; `None` makes the height request fail.
    height: Arc<RwLock<Option<u64>>>,
    /// Recorded requests.
    calls: Arc<RwLock<Vec<RecordedExplorerCall>>>,
}

impl MockExplorer {
    /// Create a new mock explorer that knows no tickets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the info returned for a ticket.
    pub async fn set_ticket(&self, ticket_id: &str, info: TicketInfo) {
        self.tickets
            .write()
            .await
            .insert(ticket_id.to_string(), info);
    }

    /// Forget a ticket so lookups fail.
    pub async fn remove_ticket(&self, ticket_id: &str) {
        self.tickets.write().await.remove(ticket_id);
    }

    /// Set the best block height.
    pub async fn set_height(&self, height: u64) {
        *self.height.write().await = Some(height);
    }

    /// Make best block requests fail.
    pub async fn clear_height(&self) {
        *self.height.write().await = None;
    }

    /// Get recorded requests.
    pub async fn recorded_calls(&self) -> Vec<RecordedExplorerCall> {
        self.calls.read().await.clone()
    }

    /// Get the number of requests made.
    pub async fn call_count(&self) -> usize {
        self.calls.read().await.len()
    }

    /// Get the number of best block requests made.
    pub async fn height_requests(&self) -> usize {
        self.calls
            .read()
            .await
            .iter()
            .filter(|c| matches!(c, RecordedExplorerCall::BestBlockHeight))
            .count()
    }
}

#[async_trait]
impl TicketExplorer for MockExplorer {
    async fn ticket_info(&self, ticket_id: &str) -> Result<TicketInfo, ExplorerError> {
        self.calls.write().await.push(RecordedExplorerCall::TicketInfo {
            ticket_id: ticket_id.to_string(),
        });

        self.tickets
            .read()
            .await
            .get(ticket_id)
            .cloned()
            .ok_or_else(|| ExplorerError::ApiError {
                status: 404,
                message: format!("ticket {} not found", ticket_id),
            })
    }

    async fn best_block_height(&self) -> Result<u64, ExplorerError> {
        self.calls
            .write()
            .await
            .push(RecordedExplorerCall::BestBlockHeight);

        self.height.read().await.ok_or_else(|| ExplorerError::ApiError {
            status: 503,
            message: "best block unavailable".to_string(),
        })
    }
}
