use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Load configuration from file with environment variable overrides
///
/// Nested keys use a double underscore, e.g. `TICKETWATCH_TELEGRAM__BOT_TOKEN`.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    let config: Config = Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed("TICKETWATCH_").ignore(&["CONFIG"]).split("__"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    Ok(config)
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_from_str_valid() {
        let toml = r#"
utc_offset = 2

[telegram]
bot_token = "t"
chat_ids = "1"

[tickets]
file_path = "tickets.txt"
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.utc_offset, 2);
    }

    #[test]
    fn test_load_config_from_str_missing_tickets() {
        let toml = r#"
[telegram]
bot_token = "t"
chat_ids = "1"
"#;
        let result = load_config_from_str(toml);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
vote_eligibility = true

[telegram]
bot_token = "123:abc"
chat_ids = ["10", "20"]

[tickets]
file_path = "/tmp/tickets.txt"
"#
        )
        .unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert!(config.vote_eligibility);
        assert_eq!(config.telegram.chat_ids.len(), 2);
        assert_eq!(config.tickets.file_path.to_str().unwrap(), "/tmp/tickets.txt");
    }
}
