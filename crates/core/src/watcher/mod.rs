//! Ticket and vote watcher.
//!
//! Sequences one invocation: delete old messages, sweep tickets, sweep
//! votes, notify. There is no internal loop; an external scheduler runs the
//! binary periodically.

mod messages;
mod runner;
mod types;

pub use messages::{compose_message, escape_html, short_id};
pub use runner::{Clock, TicketSweep, Watcher};
pub use types::{RunReport, TicketEvent, VoteEligibility, WatcherConfig, WatcherError};
