//! Telegram Bot API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use super::{MessageReceipt, MessageSender, NotifierError};
use crate::config::TelegramConfig;

/// Telegram Bot API client.
pub struct TelegramClient {
    client: Client,
    api_url: String,
    bot_token: String,
}

impl std::fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramClient")
            .field("api_url", &self.api_url)
            .field("bot_token", &"<redacted>")
            .finish()
    }
}

impl TelegramClient {
    pub fn new(config: &TelegramConfig) -> Result<Self, NotifierError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            bot_token: config.bot_token.clone(),
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_url, self.bot_token, method)
    }

    /// Call a Bot API method.
    ///
    /// Transport errors are stripped of their URL, which embeds the bot token.
    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: &[(&str, &str)],
    ) -> Result<T, NotifierError> {
        let response = self
            .client
            .get(self.method_url(method))
            .query(params)
            .send()
            .await
            .map_err(|e| NotifierError::HttpError(e.without_url()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| NotifierError::HttpError(e.without_url()))?;

        // Error replies carry a description even on non-2xx statuses
        let envelope: ApiResponse<T> = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                return Err(NotifierError::ApiError {
                    status: status.as_u16(),
                    description: body,
                });
            }
            Err(e) => {
                return Err(NotifierError::ParseError(format!(
                    "Failed to parse {} response: {}",
                    method, e
                )));
            }
        };

        match (envelope.ok, envelope.result) {
            (true, Some(result)) if status.is_success() => Ok(result),
            _ => Err(NotifierError::ApiError {
                status: envelope.error_code.unwrap_or_else(|| status.as_u16()),
                description: envelope.description.unwrap_or_default(),
            }),
        }
    }
}

#[async_trait]
impl MessageSender for TelegramClient {
    async fn send_message(
        &self,
        chat_id: &str,
        text: &str,
    ) -> Result<MessageReceipt, NotifierError> {
        debug!("Telegram sendMessage: chat_id={}", chat_id);

        let message: SentMessage = self
            .call(
                "sendMessage",
                &[("text", text), ("chat_id", chat_id), ("parse_mode", "HTML")],
            )
            .await?;

        Ok(MessageReceipt::new(message.message_id, chat_id))
    }

    async fn delete_message(&self, receipt: &MessageReceipt) -> Result<(), NotifierError> {
        debug!(
            "Telegram deleteMessage: chat_id={}, message_id={}",
            receipt.chat_id, receipt.message_id
        );

        let message_id = receipt.message_id.to_string();
        let _: bool = self
            .call(
                "deleteMessage",
                &[
                    ("chat_id", receipt.chat_id.as_str()),
                    ("message_id", message_id.as_str()),
                ],
            )
            .await?;

        Ok(())
    }
}

// Telegram API response types

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    error_code: Option<u16>,
}

#[derive(Debug, Deserialize)]
struct SentMessage {
    message_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChatDestinations;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(api_url: &str) -> TelegramConfig {
        TelegramConfig {
            bot_token: "123:abc".to_string(),
            chat_ids: ChatDestinations::from("1"),
            api_url: api_url.to_string(),
            timeout_secs: 5,
        }
    }

    fn test_client(api_url: &str) -> TelegramClient {
        TelegramClient::new(&test_config(api_url)).unwrap()
    }

    #[tokio::test]
    async fn test_send_message() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/bot123:abc/sendMessage"))
            .and(query_param("chat_id", "42"))
            .and(query_param("parse_mode", "HTML"))
            .and(query_param("text", "<b>hi</b>"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ok": true,
                "result": {"message_id": 991, "chat": {"id": 42}, "text": "hi"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let receipt = client.send_message("42", "<b>hi</b>").await.unwrap();
        assert_eq!(receipt, MessageReceipt::new(991, "42"));
    }

    #[tokio::test]
    async fn test_send_message_rejected() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/bot123:abc/sendMessage"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "ok": false,
                "error_code": 400,
                "description": "Bad Request: chat not found"
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.send_message("0", "x").await.unwrap_err();
        match err {
            NotifierError::ApiError {
                status,
                description,
            } => {
                assert_eq!(status, 400);
                assert_eq!(description, "Bad Request: chat not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_delete_message() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/bot123:abc/deleteMessage"))
            .and(query_param("chat_id", "42"))
            .and(query_param("message_id", "991"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"ok": true, "result": true})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        client
            .delete_message(&MessageReceipt::new(991, "42"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_non_json_gateway_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client
            .delete_message(&MessageReceipt::new(1, "1"))
            .await
            .unwrap_err();
        assert!(matches!(err, NotifierError::ApiError { status: 502, .. }));
        assert!(!err.is_permanent());
    }

    #[tokio::test]
    async fn test_transport_error_hides_token() {
        let client = TelegramClient::new(&TelegramConfig {
            bot_token: "123:SECRET".to_string(),
            ..test_config("http://127.0.0.1:1")
        })
        .unwrap();

        let err = client.send_message("42", "hi").await.unwrap_err();
        assert!(matches!(err, NotifierError::HttpError(_)));
        assert!(!err.is_permanent());
        let shown = err.to_string();
        assert!(!shown.contains("SECRET"), "token leaked: {shown}");

        let err = client
            .delete_message(&MessageReceipt::new(1, "42"))
            .await
            .unwrap_err();
        assert!(!err.to_string().contains("SECRET"));
    }

    #[test]
    fn test_debug_redacts_token() {
        let client = test_client("http://localhost");
        let debug = format!("{:?}", client);
        assert!(!debug.contains("123:abc"));
    }
}
