//! In-memory state store for testing.

use std::sync::{Mutex, MutexGuard};

use crate::notifier::MessageReceipt;
use crate::state::{StateError, StateStore};

/// State store keeping everything in memory.
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    tickets: Mutex<Vec<String>>,
    votes: Mutex<Vec<String>>,
    receipts: Mutex<Vec<MessageReceipt>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store tracking the given tickets.
    pub fn with_tickets<S: AsRef<str>>(tickets: &[S]) -> Self {
        let store = Self::new();
        *lock(&store.tickets) = tickets.iter().map(|t| t.as_ref().to_string()).collect();
        store
    }

    /// Pre-acknowledge vote tokens.
    pub fn set_votes<S: AsRef<str>>(&self, tokens: &[S]) {
        *lock(&self.votes) = tokens.iter().map(|t| t.as_ref().to_string()).collect();
    }

    /// Pre-record pending-delete receipts.
    pub fn set_receipts(&self, receipts: Vec<MessageReceipt>) {
        *lock(&self.receipts) = receipts;
    }

    pub fn tickets(&self) -> Vec<String> {
        lock(&self.tickets).clone()
    }

    pub fn votes(&self) -> Vec<String> {
        lock(&self.votes).clone()
    }

    pub fn receipts(&self) -> Vec<MessageReceipt> {
        lock(&self.receipts).clone()
    }
}

impl StateStore for MemoryStateStore {
    fn load_active_tickets(&self) -> Result<Vec<String>, StateError> {
        Ok(self.tickets())
    }

    fn save_active_tickets(&self, tickets: &[String]) -> Result<(), StateError> {
        *lock(&self.tickets) = tickets.to_vec();
        Ok(())
    }

    fn load_acknowledged_votes(&self) -> Result<Vec<String>, StateError> {
        Ok(self.votes())
    }

    fn save_acknowledged_votes(&self, tokens: &[String]) -> Result<(), StateError> {
        *lock(&self.votes) = tokens.to_vec();
        Ok(())
    }

    fn load_receipts(&self) -> Result<Vec<MessageReceipt>, StateError> {
        Ok(self.receipts())
    }

    fn save_receipts(&self, receipts: &[MessageReceipt]) -> Result<(), StateError> {
        *lock(&self.receipts) = receipts.to_vec();
        Ok(())
    }
}
