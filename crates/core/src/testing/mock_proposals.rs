//! Mock proposal source for testing.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::proposals::{ProposalError, ProposalSource, Vote};

/// Mock implementation of the ProposalSource trait.
///
/// Returns a configurable list of active votes, can be switched to fail,
/// and counts requests.
#[derive(Debug, Default)]
pub struct MockProposalSource {
    votes: Arc<RwLock<Vec<Vote>>>,
    failing: AtomicBool,
    requests: AtomicUsize,
}

impl MockProposalSource {
    /// Create a new mock with no active votes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the active votes returned by subsequent requests.
    pub async fn set_votes(&self, votes: Vec<Vote>) {
        *self.votes.write().await = votes;
    }

    /// Make subsequent requests fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Get the number of requests made.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProposalSource for MockProposalSource {
    async fn active_votes(&self) -> Result<Vec<Vote>, ProposalError> {
        self.requests.fetch_add(1, Ordering::SeqCst);

        if self.failing.load(Ordering::SeqCst) {
            return Err(ProposalError::ApiError {
                status: 503,
                message: "proposals unavailable".to_string(),
            });
        }

        Ok(self.votes.read().await.clone())
    }
}
