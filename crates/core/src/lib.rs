pub mod config;
pub mod explorer;
pub mod maturity;
pub mod notifier;
pub mod proposals;
pub mod state;
pub mod testing;
pub mod watcher;

pub use config::{
    load_config, load_config_from_str, validate_config, ChatDestinations, Config, ConfigError,
    SanitizedConfig,
};
pub use explorer::{DcrdataClient, ExplorerError, TicketExplorer, TicketInfo, TicketStatus};
pub use maturity::estimate_maturity;
pub use notifier::{MessageReceipt, MessageSender, NotifierError, TelegramClient};
pub use proposals::{PoliteiaClient, ProposalError, ProposalSource, Vote};
pub use state::{FileStateStore, StateError, StateStore};
pub use watcher::{
    short_id, RunReport, TicketEvent, VoteEligibility, Watcher, WatcherConfig, WatcherError,
};
