//! Line-delimited text file state store.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::{StateError, StateStore};
use crate::config::Config;
use crate::notifier::MessageReceipt;

/// State store backed by three plain text files, one record per line.
///
/// The tickets file is maintained by the user and must exist. The votes and
/// receipts files are created on first write and read as empty until then.
pub struct FileStateStore {
    tickets_path: PathBuf,
    votes_path: PathBuf,
    receipts_path: PathBuf,
}

impl FileStateStore {
    pub fn new(
        tickets_path: impl Into<PathBuf>,
        votes_path: impl Into<PathBuf>,
        receipts_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            tickets_path: tickets_path.into(),
            votes_path: votes_path.into(),
            receipts_path: receipts_path.into(),
        }
    }

    /// Build a store from the configured file locations.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.tickets.file_path,
            &config.state.checked_votes_path,
            &config.state.to_delete_path,
        )
    }

    pub fn tickets_path(&self) -> &Path {
        &self.tickets_path
    }

    fn read_lines(path: &Path) -> Result<Vec<String>, StateError> {
        let content = fs::read_to_string(path).map_err(|source| StateError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    fn read_lines_or_empty(path: &Path) -> Result<Vec<String>, StateError> {
        match Self::read_lines(path) {
            Err(StateError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
                debug!("State file {:?} does not exist yet", path);
                Ok(Vec::new())
            }
            other => other,
        }
    }

    fn write_lines<S: AsRef<str>>(path: &Path, lines: &[S]) -> Result<(), StateError> {
        let mut content = String::new();
        for line in lines {
            content.push_str(line.as_ref());
            content.push('\n');
        }
        fs::write(path, content).map_err(|source| StateError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Wrote {} lines to {:?}", lines.len(), path);
        Ok(())
    }
}

impl StateStore for FileStateStore {
    fn load_active_tickets(&self) -> Result<Vec<String>, StateError> {
        Self::read_lines(&self.tickets_path)
    }

    fn save_active_tickets(&self, tickets: &[String]) -> Result<(), StateError> {
        Self::write_lines(&self.tickets_path, tickets)
    }

    fn load_acknowledged_votes(&self) -> Result<Vec<String>, StateError> {
        Self::read_lines_or_empty(&self.votes_path)
    }

    fn save_acknowledged_votes(&self, tokens: &[String]) -> Result<(), StateError> {
        Self::write_lines(&self.votes_path, tokens)
    }

    fn load_receipts(&self) -> Result<Vec<MessageReceipt>, StateError> {
        let lines = Self::read_lines_or_empty(&self.receipts_path)?;
        let mut receipts = Vec::with_capacity(lines.len());
        for line in lines {
            match serde_json::from_str::<MessageReceipt>(&line) {
                Ok(receipt) => receipts.push(receipt),
                Err(e) => warn!("Skipping malformed receipt line {:?}: {}", line, e),
            }
        }
        Ok(receipts)
    }

    fn save_receipts(&self, receipts: &[MessageReceipt]) -> Result<(), StateError> {
        let lines = receipts
            .iter()
            .map(serde_json::to_string)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| StateError::Encode(e.to_string()))?;
        Self::write_lines(&self.receipts_path, &lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> FileStateStore {
        FileStateStore::new(
            dir.path().join("tickets.txt"),
            dir.path().join("votes.txt"),
            dir.path().join("to_delete.txt"),
        )
    }

    #[test]
    fn test_missing_tickets_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let err = store.load_active_tickets().unwrap_err();
        assert!(matches!(err, StateError::Io { .. }));
    }

    #[test]
    fn test_tickets_trims_crlf_and_blank_lines() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.tickets_path(), "aaa\r\n\nbbb\n  \nccc").unwrap();

        let tickets = store.load_active_tickets().unwrap();
        assert_eq!(tickets, vec!["aaa", "bbb", "ccc"]);
    }

    #[test]
    fn test_save_tickets_overwrites_and_empty_is_valid() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store
            .save_active_tickets(&["t1".to_string(), "t2".to_string()])
            .unwrap();
        assert_eq!(store.load_active_tickets().unwrap(), vec!["t1", "t2"]);

        store.save_active_tickets(&[]).unwrap();
        assert!(store.load_active_tickets().unwrap().is_empty());
        assert_eq!(fs::read_to_string(store.tickets_path()).unwrap(), "");
    }

    #[test]
    fn test_votes_missing_file_reads_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(store.load_acknowledged_votes().unwrap().is_empty());

        store
            .save_acknowledged_votes(&["tok1".to_string()])
            .unwrap();
        assert_eq!(store.load_acknowledged_votes().unwrap(), vec!["tok1"]);
    }

    #[test]
    fn test_receipts_are_json_lines() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let receipts = vec![
            MessageReceipt::new(10, "100"),
            MessageReceipt::new(11, "-200"),
        ];
        store.save_receipts(&receipts).unwrap();

        let raw = fs::read_to_string(dir.path().join("to_delete.txt")).unwrap();
        let first: serde_json::Value = serde_json::from_str(raw.lines().next().unwrap()).unwrap();
        assert_eq!(first["message_id"], 10);
        assert_eq!(first["chat_id"], "100");

        assert_eq!(store.load_receipts().unwrap(), receipts);
    }

    #[test]
    fn test_append_receipts_keeps_existing() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.append_receipts(&[MessageReceipt::new(1, "a")]).unwrap();
        store.append_receipts(&[MessageReceipt::new(2, "b")]).unwrap();

        let ids: Vec<i64> = store
            .load_receipts()
            .unwrap()
            .iter()
            .map(|r| r.message_id)
            .collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_malformed_receipt_lines_are_skipped() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(
            dir.path().join("to_delete.txt"),
            "{\"message_id\": 5, \"chat_id\": \"9\"}\nnot json\n",
        )
        .unwrap();

        let receipts = store.load_receipts().unwrap();
        assert_eq!(receipts, vec![MessageReceipt::new(5, "9")]);
    }
}
