//! Watcher implementation.
//!
//! One run performs, in order:
//! - Delete the messages sent by the previous run (optional)
//! - Ticket sweep: report tickets that voted, missed or expired
//! - Vote sweep: report proposals the tracked tickets may newly vote on (optional)
//! - Notify every chat destination

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::explorer::{TicketExplorer, TicketStatus};
use crate::maturity::estimate_maturity;
use crate::notifier::{MessageReceipt, MessageSender};
use crate::proposals::ProposalSource;
use crate::state::StateStore;

use super::messages::compose_message;
use super::types::{RunReport, TicketEvent, VoteEligibility, WatcherConfig, WatcherError};

/// Source of the current time, replaceable in tests.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Result of checking the tracked tickets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketSweep {
    /// Tickets that stay in the store.
    pub active: Vec<String>,
    pub events: Vec<TicketEvent>,
}

/// The watcher - checks tickets and votes once and notifies about changes.
pub struct Watcher {
    config: WatcherConfig,
    store: Arc<dyn StateStore>,
    explorer: Arc<dyn TicketExplorer>,
    proposals: Arc<dyn ProposalSource>,
    sender: Arc<dyn MessageSender>,
    clock: Clock,
}

impl Watcher {
    /// Create a new watcher.
    pub fn new(
        config: WatcherConfig,
        store: Arc<dyn StateStore>,
        explorer: Arc<dyn TicketExplorer>,
        proposals: Arc<dyn ProposalSource>,
        sender: Arc<dyn MessageSender>,
    ) -> Self {
        Self {
            config,
            store,
            explorer,
            proposals,
            sender,
            clock: Arc::new(Utc::now),
        }
    }

    /// Replace the clock used for maturity estimates.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Perform one complete run.
    pub async fn run(&self) -> Result<RunReport, WatcherError> {
        let mut report = RunReport::default();

        if self.config.delete_old {
            report.messages_deleted = self.delete_old().await?;
        }

        let tickets = self.store.load_active_tickets()?;
        if tickets.is_empty() {
            info!("no tickets to check");
            report.skipped = true;
            return Ok(report);
        }
        info!("Checking {} tickets", tickets.len());

        let sweep = self.sweep_tickets(&tickets).await?;
        report.tickets_kept = sweep.active.len();
        report.events = sweep.events;

        if self.config.vote_eligibility {
            report.eligibilities = self.sweep_votes(&tickets).await?;
        }

        if let Some(message) = compose_message(
            &report.events,
            &report.eligibilities,
            &self.config.proposals_web_url,
        ) {
            report.messages_sent = self.notify(&message).await?;
        } else {
            debug!("Nothing to notify");
        }

        Ok(report)
    }

    /// Check every tracked ticket and rewrite the store with those still pending.
    pub async fn sweep_tickets(&self, tickets: &[String]) -> Result<TicketSweep, WatcherError> {
        let mut sweep = TicketSweep::default();
        // Fetched on the first resolved ticket; `Some(None)` records a failed fetch
        let mut current_height: Option<Option<u64>> = None;

        for ticket_id in tickets {
            let info = match self.explorer.ticket_info(ticket_id).await {
                Ok(info) => info,
                Err(e) => {
                    warn!("Failed to check ticket {}: {}", ticket_id, e);
                    sweep.active.push(ticket_id.clone());
                    continue;
                }
            };
            debug!("Checked ticket {}: {}", ticket_id, info.status);

            if info.status.is_pre_vote() {
                sweep.active.push(ticket_id.clone());
                continue;
            }

            if let TicketStatus::Unknown(status) = &info.status {
                warn!("Ticket {} has unrecognised status {:?}", ticket_id, status);
            }

            let maturity = match info.event_height() {
                Some(event_height) => {
                    if current_height.is_none() {
                        current_height = Some(self.fetch_current_height().await);
                    }
                    current_height.flatten().and_then(|height| {
                        estimate_maturity(
                            event_height,
                            height,
                            self.config.utc_offset,
                            (self.clock)(),
                        )
                    })
                }
                None => None,
            };

            info!("Ticket {} is {}", ticket_id, info.status);
            sweep.events.push(TicketEvent {
                ticket_id: ticket_id.clone(),
                status: info.status,
                maturity,
            });
        }

        self.store.save_active_tickets(&sweep.active)?;
        info!("Wrote {} active tickets", sweep.active.len());

        Ok(sweep)
    }

    async fn fetch_current_height(&self) -> Option<u64> {
        match self.explorer.best_block_height().await {
            Ok(height) => Some(height),
            Err(e) => {
                warn!("Failed to fetch current block height: {}", e);
                None
            }
        }
    }

    /// Report active votes not yet acknowledged that tracked tickets may vote on.
    pub async fn sweep_votes(
        &self,
        tickets: &[String],
    ) -> Result<Vec<VoteEligibility>, WatcherError> {
        let acknowledged = self.store.load_acknowledged_votes()?;

        let votes = match self.proposals.active_votes().await {
            Ok(votes) => votes,
            Err(e) => {
                warn!("Failed to fetch active votes: {}", e);
                return Ok(Vec::new());
            }
        };

        let mut eligibilities = Vec::new();
        for vote in &votes {
            if acknowledged.contains(&vote.token) {
                continue;
            }
            let eligible = vote.count_eligible(tickets);
            if eligible > 0 {
                info!(
                    "{} tickets eligible to vote on {} ({})",
                    eligible, vote.proposal_name, vote.token
                );
                eligibilities.push(VoteEligibility {
                    token: vote.token.clone(),
                    proposal_name: vote.proposal_name.clone(),
                    eligible,
                });
            }
        }

        let tokens: Vec<String> = votes.into_iter().map(|v| v.token).collect();
        self.store.save_acknowledged_votes(&tokens)?;
        info!("Wrote {} active vote tokens", tokens.len());

        Ok(eligibilities)
    }

    /// Send a message to every chat destination, returning how many succeeded.
    pub async fn notify(&self, message: &str) -> Result<usize, WatcherError> {
        let mut receipts: Vec<MessageReceipt> = Vec::new();

        for chat_id in self.config.chat_ids.iter() {
            match self.sender.send_message(chat_id, message).await {
                Ok(receipt) => {
                    info!("Sent notification to chat {}", chat_id);
                    receipts.push(receipt);
                }
                Err(e) => warn!("Failed to notify chat {}: {}", chat_id, e),
            }
        }

        if self.config.delete_old {
            self.store.append_receipts(&receipts)?;
        }

        Ok(receipts.len())
    }

    /// Delete the messages recorded by earlier runs, returning how many were deleted.
    ///
    /// Receipts are dropped once deleted or rejected for good; those that
    /// failed for a transient reason are kept for the next run.
    pub async fn delete_old(&self) -> Result<usize, WatcherError> {
        let receipts = self.store.load_receipts()?;
        if receipts.is_empty() {
            return Ok(0);
        }

        let mut deleted = 0;
        let mut retained = Vec::new();
        for receipt in receipts {
            match self.sender.delete_message(&receipt).await {
                Ok(()) => {
                    info!(
                        "Deleted old message {} in chat {}",
                        receipt.message_id, receipt.chat_id
                    );
                    deleted += 1;
                }
                Err(e) if e.is_permanent() => {
                    warn!(
                        "Dropping message {} in chat {}: {}",
                        receipt.message_id, receipt.chat_id, e
                    );
                }
                Err(e) => {
                    warn!(
                        "Failed to delete message {} in chat {}: {}",
                        receipt.message_id, receipt.chat_id, e
                    );
                    retained.push(receipt);
                }
            }
        }

        self.store.save_receipts(&retained)?;
        Ok(deleted)
    }
}
