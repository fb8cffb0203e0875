//! dcrdata REST API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use tracing::debug;

use super::types::{BestBlock, TicketInfo};
use super::{ExplorerError, TicketExplorer};
use crate::config::ExplorerConfig;

/// dcrdata API client.
pub struct DcrdataClient {
    client: Client,
    base_url: String,
}

impl DcrdataClient {
    /// Create a new dcrdata client.
    pub fn new(config: &ExplorerConfig) -> Result<Self, ExplorerError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn check_status(response: Response) -> Result<Response, ExplorerError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExplorerError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl TicketExplorer for DcrdataClient {
    async fn ticket_info(&self, ticket_id: &str) -> Result<TicketInfo, ExplorerError> {
        let url = format!("{}/tx/{}/tinfo", self.base_url, ticket_id);

        debug!("dcrdata ticket info: id={}", ticket_id);

        let response = Self::check_status(self.client.get(&url).send().await?).await?;

        response.json().await.map_err(|e| {
            ExplorerError::ParseError(format!("Failed to parse ticket info response: {}", e))
        })
    }

    async fn best_block_height(&self) -> Result<u64, ExplorerError> {
        let url = format!("{}/block/best", self.base_url);

        debug!("dcrdata best block");

        let response = Self::check_status(self.client.get(&url).send().await?).await?;

        let best: BestBlock = response.json().await.map_err(|e| {
            ExplorerError::ParseError(format!("Failed to parse best block response: {}", e))
        })?;

        Ok(best.height)
    }
}
