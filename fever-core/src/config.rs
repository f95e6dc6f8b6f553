use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::SyncError;

/// Connection settings for a Fever endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// e.g. `http://freshrss.example.net/api/fever.php?api`
    pub api_url: String,
    pub username: String,
    pub api_password: String,
    /// Snapshot location override. Without it the snapshot goes next to the
    /// config file.
    pub feeds_file: Option<PathBuf>,
}

impl Config {
    /// Per-user config directory for this application.
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("fever-sync"))
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SyncError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Load `config.json` from the per-user config directory.
    pub fn load() -> Result<Self, SyncError> {
        let dir = Self::config_dir().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "no user config directory")
        })?;
        Self::load_from(dir.join("config.json"))
    }

    pub fn endpoint(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.api_url)
    }

    /// Where the feed snapshot should live.
    pub fn feeds_file(&self) -> PathBuf {
        match &self.feeds_file {
            Some(path) => path.clone(),
            None => Self::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("feeds.json"),
        }
    }
}
