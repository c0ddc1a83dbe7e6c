//! Tracing setup. The TUI owns the terminal, so events go to a log file
//! under the config directory.

use crate::config::Config;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE: &str = "feedex.log";

/// Appending writer for `dir/feedex.log`, and the path it writes to.
/// Falls back to discarding events when the file cannot be opened.
pub fn log_writer(dir: &Path) -> (BoxMakeWriter, Option<PathBuf>) {
    let path = dir.join(LOG_FILE);
    let opened = std::fs::create_dir_all(dir)
        .and_then(|_| OpenOptions::new().create(true).append(true).open(&path));

    match opened {
        Ok(file) => (BoxMakeWriter::new(Arc::new(file)), Some(path)),
        Err(_) => (BoxMakeWriter::new(std::io::sink), None),
    }
}

/// Install the global subscriber. `FEEDEX_LOG` overrides the configured level.
pub fn init(config: &Config) {
    let (writer, path) = match Config::config_dir() {
        Ok(dir) => log_writer(&dir),
        Err(_) => (BoxMakeWriter::new(std::io::sink), None),
    };

    let filter = EnvFilter::try_from_env("FEEDEX_LOG")
        .unwrap_or_else(|_| EnvFilter::new(format!("feedex={}", config.log_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    match path {
        Some(path) => tracing::debug!(path = ?path, "logging to file"),
        None => eprintln!("feedex: log file unavailable, logging disabled"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_writer_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("feedex");

        let (_, path) = log_writer(&nested);
        let path = path.expect("log file opened");
        assert_eq!(path, nested.join(LOG_FILE));
        assert!(path.exists());
    }

    #[test]
    fn test_log_writer_falls_back_when_unwritable() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"").unwrap();

        let (_, path) = log_writer(&blocker.join("feedex"));
        assert_eq!(path, None);
    }
}
