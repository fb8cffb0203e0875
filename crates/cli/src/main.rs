mod logging;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info};

use ticketwatch_core::{
    load_config, validate_config, Config, ConfigError, DcrdataClient, FileStateStore,
    PoliteiaClient, SanitizedConfig, TelegramClient, Watcher, WatcherConfig,
};

/// Environment variable naming the config file
const CONFIG_ENV: &str = "TICKETWATCH_CONFIG";

#[tokio::main]
async fn main() {
    let config_path = config_path(std::env::var(CONFIG_ENV).ok());
    let config = load_config(&config_path);

    // The log file location comes from the config, so load it before logging
    let log_file = config.as_ref().ok().and_then(|c| c.logging.file.clone());
    if let Err(e) = logging::init(log_file.as_deref()) {
        eprintln!("Failed to initialize logging: {:#}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(config_path, config).await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

fn config_path(from_env: Option<String>) -> PathBuf {
    from_env
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("config.toml"))
}

async fn run(config_path: PathBuf, config: Result<Config, ConfigError>) -> Result<()> {
    info!("running...");

    let config =
        config.with_context(|| format!("Failed to load config from {:?}", config_path))?;
    validate_config(&config).context("Configuration validation failed")?;
    info!("Configuration loaded: {:?}", SanitizedConfig::from(&config));

    let store = Arc::new(FileStateStore::from_config(&config));
    let explorer = Arc::new(
        DcrdataClient::new(&config.explorer).context("Failed to create explorer client")?,
    );
    let proposals = Arc::new(
        PoliteiaClient::new(&config.proposals).context("Failed to create proposals client")?,
    );
    let sender = Arc::new(
        TelegramClient::new(&config.telegram).context("Failed to create Telegram client")?,
    );

    let watcher = Watcher::new(
        WatcherConfig::from(&config),
        store,
        explorer,
        proposals,
        sender,
    );

    let report = watcher.run().await.context("Watcher run failed")?;

    info!(
        "Run complete: {} ticket events, {} vote notices, {} tickets still watched, {} messages sent, {} deleted",
        report.events.len(),
        report.eligibilities.len(),
        report.tickets_kept,
        report.messages_sent,
        report.messages_deleted
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path_default() {
        assert_eq!(config_path(None), PathBuf::from("config.toml"));
    }

    #[test]
    fn test_config_path_from_env() {
        assert_eq!(
            config_path(Some("/etc/ticketwatch.toml".to_string())),
            PathBuf::from("/etc/ticketwatch.toml")
        );
    }

    #[tokio::test]
    async fn test_run_fails_on_missing_config() {
        let path = PathBuf::from("/nonexistent/config.toml");
        let result = run(path.clone(), load_config(&path)).await;
        let err = result.unwrap_err();
        assert!(format!("{:#}", err).contains("Configuration file not found"));
    }

    #[tokio::test]
    async fn test_run_fails_validation() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[telegram]
bot_token = ""
chat_ids = "1"

[tickets]
file_path = "tickets.txt"
"#,
        )
        .unwrap();

        let err = run(path.clone(), load_config(&path)).await.unwrap_err();
        assert!(format!("{:#}", err).contains("bot_token"));
    }
}
