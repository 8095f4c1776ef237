use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::game::Promotion;

/// Environment variable naming the JSON config file
pub const CONFIG_ENV: &str = "CHESS_SYNC_CONFIG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayConfig {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl Default for DelayConfig {
    fn default() -> Self {
        Self {
            min_ms: 400,
            max_ms: 800,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the authority, used by the client
    pub server_url: String,
    /// Address the authority server listens on
    pub bind_address: String,
    /// Pause before an opponent reply is shown
    pub reply_delay: DelayConfig,
    /// Piece a pawn promotes to
    pub promotion: Promotion,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8080".to_string(),
            bind_address: "127.0.0.1:8080".to_string(),
            reply_delay: DelayConfig::default(),
            promotion: Promotion::Queen,
        }
    }
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load from `path`, else from the file named by `CHESS_SYNC_CONFIG`, else defaults
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let path = path
            .map(str::to_string)
            .or_else(|| std::env::var(CONFIG_ENV).ok());
        match path {
            Some(path) => {
                info!("Loading config from {}", path);
                Self::from_file(path)
            }
            None => Ok(Self::default()),
        }
    }
}
