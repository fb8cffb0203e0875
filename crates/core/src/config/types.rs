use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub telegram: TelegramConfig,
    pub tickets: TicketsConfig,
    /// Hours added to UTC when formatting maturity estimates.
    #[serde(default)]
    pub utc_offset: i32,
    /// Check active proposal votes for newly eligible tickets.
    #[serde(default)]
    pub vote_eligibility: bool,
    /// Delete the messages sent on the previous run before notifying.
    #[serde(default)]
    pub delete_old: bool,
    #[serde(default)]
    pub state: StateConfig,
    #[serde(default)]
    pub explorer: ExplorerConfig,
    #[serde(default)]
    pub proposals: ProposalsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Telegram bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_ids: ChatDestinations,
    /// Bot API base URL (default: https://api.telegram.org)
    #[serde(default = "default_telegram_api_url")]
    pub api_url: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

fn default_telegram_api_url() -> String {
    "https://api.telegram.org".to_string()
}

/// One or more chat identifiers.
///
/// Accepts a single value or a list in the config file; numeric ids are
/// kept in their textual form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ChatDestinations(Vec<String>);

impl ChatDestinations {
    pub fn new(ids: Vec<String>) -> Self {
        Self(ids)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for ChatDestinations {
    fn from(id: &str) -> Self {
        Self(vec![id.to_string()])
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ChatIdValue {
    Text(String),
    Number(i64),
}

impl ChatIdValue {
    fn into_string(self) -> String {
        match self {
            ChatIdValue::Text(s) => s,
            ChatIdValue::Number(n) => n.to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(ChatIdValue),
    Many(Vec<ChatIdValue>),
}

impl<'de> Deserialize<'de> for ChatDestinations {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let ids = match OneOrMany::deserialize(deserializer)? {
            OneOrMany::One(id) => vec![id.into_string()],
            OneOrMany::Many(ids) => ids.into_iter().map(ChatIdValue::into_string).collect(),
        };
        Ok(Self(ids))
    }
}

/// Tracked tickets configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TicketsConfig {
    /// File listing the ticket hashes to watch, one per line.
    pub file_path: PathBuf,
}

/// Paths of the files the watcher keeps between runs
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StateConfig {
    #[serde(default = "default_checked_votes_path")]
    pub checked_votes_path: PathBuf,
    #[serde(default = "default_to_delete_path")]
    pub to_delete_path: PathBuf,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            checked_votes_path: default_checked_votes_path(),
            to_delete_path: default_to_delete_path(),
        }
    }
}

fn default_checked_votes_path() -> PathBuf {
    PathBuf::from("checked_votes.txt")
}

fn default_to_delete_path() -> PathBuf {
    PathBuf::from("to_delete.txt")
}

/// Block explorer configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExplorerConfig {
    /// dcrdata API root (default: https://dcrdata.org/api)
    #[serde(default = "default_explorer_url")]
    pub base_url: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            base_url: default_explorer_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_explorer_url() -> String {
    "https://dcrdata.org/api".to_string()
}

fn default_timeout() -> u32 {
    30
}

/// Proposal system configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProposalsConfig {
    /// Endpoint listing the proposals currently being voted on.
    #[serde(default = "default_active_votes_url")]
    pub active_votes_url: String,
    /// Public proposal page prefix, used for links in messages.
    #[serde(default = "default_proposals_web_url")]
    pub web_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

impl Default for ProposalsConfig {
    fn default() -> Self {
        Self {
            active_votes_url: default_active_votes_url(),
            web_url: default_proposals_web_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_active_votes_url() -> String {
    "https://proposals.decred.org/api/v1/proposals/activevote".to_string()
}

fn default_proposals_web_url() -> String {
    "https://proposals.decred.org/proposals".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Append log lines to this file in addition to stderr.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

/// Sanitized config for log output (bot token redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub bot_token_configured: bool,
    pub chat_count: usize,
    pub tickets_file: PathBuf,
    pub utc_offset: i32,
    pub vote_eligibility: bool,
    pub delete_old: bool,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            bot_token_configured: !config.telegram.bot_token.is_empty(),
            chat_count: config.telegram.chat_ids.len(),
            tickets_file: config.tickets.file_path.clone(),
            utc_offset: config.utc_offset,
            vote_eligibility: config.vote_eligibility,
            delete_old: config.delete_old,
        }
    }
}
