//! Persistent state kept between runs.
//!
//! Three small collections survive from one invocation to the next: the
//! tickets still being watched, the vote tokens already reported, and the
//! receipts of messages to delete on the next run.

mod file_store;

pub use file_store::FileStateStore;

use std::path::PathBuf;

use thiserror::Error;

use crate::notifier::MessageReceipt;

/// Error type for state store operations.
#[derive(Debug, Error)]
pub enum StateError {
    /// Reading or writing a state file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A record could not be encoded for storage.
    #[error("Failed to encode record: {0}")]
    Encode(String),
}

/// Trait for state storage backends.
pub trait StateStore: Send + Sync {
    /// Tickets still awaiting a terminal status, in stored order.
    fn load_active_tickets(&self) -> Result<Vec<String>, StateError>;

    /// Replace the watched tickets.
    fn save_active_tickets(&self, tickets: &[String]) -> Result<(), StateError>;

    /// Vote tokens already reported.
    fn load_acknowledged_votes(&self) -> Result<Vec<String>, StateError>;

    /// Replace the reported vote tokens.
    fn save_acknowledged_votes(&self, tokens: &[String]) -> Result<(), StateError>;

    /// Receipts of sent messages waiting to be deleted.
    fn load_receipts(&self) -> Result<Vec<MessageReceipt>, StateError>;

    /// Replace the pending-delete receipts.
    fn save_receipts(&self, receipts: &[MessageReceipt]) -> Result<(), StateError>;

    /// Add receipts after the existing ones.
    fn append_receipts(&self, receipts: &[MessageReceipt]) -> Result<(), StateError> {
        if receipts.is_empty() {
            return Ok(());
        }
        let mut all = self.load_receipts()?;
        all.extend_from_slice(receipts);
        self.save_receipts(&all)
    }
}
