//! Mock message sender for testing.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::notifier::{MessageReceipt, MessageSender, NotifierError};

/// A message the mock accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub chat_id: String,
    pub text: String,
    pub message_id: i64,
}

/// Mock implementation of the MessageSender trait.
///
/// Provides controllable behavior for testing:
/// - Record sent and deleted messages
/// - Reject sends to selected chats
/// - Fail deletes of selected messages with a given status
#[derive(Debug)]
pub struct MockMessageSender {
    sent: Arc<RwLock<Vec<SentMessage>>>,
    deleted: Arc<RwLock<Vec<MessageReceipt>>>,
    failing_chats: Arc<RwLock<HashSet<String>>>,
    /// Message id -> HTTP status to fail the delete with.
    delete_failures: Arc<RwLock<HashMap<i64, u16>>>,
    next_message_id: AtomicI64,
}

impl Default for MockMessageSender {
    fn default() -> Self {
        Self::new()
    }
}

impl MockMessageSender {
    /// Create a new mock sender; message ids start at 1.
    pub fn new() -> Self {
        Self {
            sent: Arc::new(RwLock::new(Vec::new())),
            deleted: Arc::new(RwLock::new(Vec::new())),
            failing_chats: Arc::new(RwLock::new(HashSet::new())),
            delete_failures: Arc::new(RwLock::new(HashMap::new())),
            next_message_id: AtomicI64::new(1),
        }
    }

    /// Reject every message sent to this chat.
    pub async fn fail_chat(&self, chat_id: &str) {
        self.failing_chats.write().await.insert(chat_id.to_string());
    }

    /// Fail the deletion of a message with the given HTTP status.
    pub async fn fail_delete(&self, message_id: i64, status: u16) {
        self.delete_failures.write().await.insert(message_id, status);
    }

    /// Messages sent so far.
    pub async fn sent_messages(&self) -> Vec<SentMessage> {
        self.sent.read().await.clone()
    }

    /// Messages deleted so far.
    pub async fn deleted_messages(&self) -> Vec<MessageReceipt> {
        self.deleted.read().await.clone()
    }
}

#[async_trait]
impl MessageSender for MockMessageSender {
    async fn send_message(
        &self,
        chat_id: &str,
        text: &str,
    ) -> Result<MessageReceipt, NotifierError> {
        if self.failing_chats.read().await.contains(chat_id) {
            return Err(NotifierError::ApiError {
                status: 400,
                description: "Bad Request: chat not found".to_string(),
            });
        }

        let message_id = self.next_message_id.fetch_add(1, Ordering::SeqCst);
        self.sent.write().await.push(SentMessage {
            chat_id: chat_id.to_string(),
            text: text.to_string(),
            message_id,
        });

        Ok(MessageReceipt::new(message_id, chat_id))
    }

    async fn delete_message(&self, receipt: &MessageReceipt) -> Result<(), NotifierError> {
        if let Some(status) = self.delete_failures.read().await.get(&receipt.message_id) {
            return Err(NotifierError::ApiError {
                status: *status,
                description: "delete failed".to_string(),
            });
        }

        self.deleted.write().await.push(receipt.clone());
        Ok(())
    }
}
