use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Telegram bot token is set
/// - At least one chat id is configured
/// - Tickets file path is set
/// - UTC offset is a real timezone offset
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.telegram.bot_token.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "telegram.bot_token cannot be empty".to_string(),
        ));
    }

    if config.telegram.chat_ids.is_empty() || config.telegram.chat_ids.iter().any(str::is_empty) {
        return Err(ConfigError::ValidationError(
            "telegram.chat_ids must contain at least one non-empty id".to_string(),
        ));
    }

    if config.tickets.file_path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "tickets.file_path cannot be empty".to_string(),
        ));
    }

    if !(-12..=14).contains(&config.utc_offset) {
        return Err(ConfigError::ValidationError(format!(
            "utc_offset must be between -12 and 14, got {}",
            config.utc_offset
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_from_str;

    fn base_config() -> Config {
        load_config_from_str(
            r#"
[telegram]
bot_token = "t"
chat_ids = ["1"]

[tickets]
file_path = "tickets.txt"
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(validate_config(&base_config()).is_ok());
    }

    #[test]
    fn test_validate_empty_token_fails() {
        let mut config = base_config();
        config.telegram.bot_token = "  ".to_string();
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_validate_no_chats_fails() {
        let mut config = base_config();
        config.telegram.chat_ids = Default::default();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_offset_out_of_range() {
        let mut config = base_config();
        config.utc_offset = 15;
        assert!(validate_config(&config).is_err());

        config.utc_offset = -12;
        assert!(validate_config(&config).is_ok());
    }
}
