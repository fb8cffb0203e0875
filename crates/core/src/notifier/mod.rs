//! Chat notifications.
//!
//! Sends HTML formatted messages to chat destinations and deletes messages
//! sent on earlier runs.

mod telegram;

pub use telegram::TelegramClient;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Errors that can occur when talking to the messaging provider.
#[derive(Debug, Error)]
pub enum NotifierError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Provider rejected the request.
    #[error("API error: {status} - {description}")]
    ApiError { status: u16, description: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

impl NotifierError {
    /// Whether repeating the same request cannot succeed.
    ///
    /// Client errors (message already gone, too old to delete, unknown chat)
    /// are permanent; transport failures and server errors are not.
    pub fn is_permanent(&self) -> bool {
        match self {
            NotifierError::ApiError { status, .. } => (400..500).contains(status) && *status != 429,
            NotifierError::HttpError(_) | NotifierError::ParseError(_) => false,
        }
    }
}

/// A sent message, kept so it can be deleted later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageReceipt {
    pub message_id: i64,
    #[serde(deserialize_with = "chat_id_from_any")]
    pub chat_id: String,
}

impl MessageReceipt {
    pub fn new(message_id: i64, chat_id: impl Into<String>) -> Self {
        Self {
            message_id,
            chat_id: chat_id.into(),
        }
    }
}

fn chat_id_from_any<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}

/// Trait for messaging providers.
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// Send an HTML formatted message to one chat.
    async fn send_message(&self, chat_id: &str, text: &str)
        -> Result<MessageReceipt, NotifierError>;

    /// Delete a previously sent message.
    async fn delete_message(&self, receipt: &MessageReceipt) -> Result<(), NotifierError>;
}
