use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use crate::core::pipeline::relay::{
    default_relay_endpoints, HttpTransport, RelayEndpoint, RelayRouter,
};
use crate::core::services::chosic::{ChosicClient, MIN_SUGGESTION_PREFIX, PLAYLIST_GENERATOR_URL};

fn default_relay_timeout_seconds() -> u64 {
    10
}

fn default_min_suggestion_length() -> usize {
    MIN_SUGGESTION_PREFIX
}

fn default_source_url() -> String {
    PLAYLIST_GENERATOR_URL.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Source page the playlist searches scrape.
    #[serde(default = "default_source_url")]
    pub source_url: String,

    /// Per-relay attempt timeout; a relay slower than this is treated as down.
    #[serde(default = "default_relay_timeout_seconds")]
    pub relay_timeout_seconds: u64,

    /// Suggestion prefixes shorter than this never hit the network.
    #[serde(default = "default_min_suggestion_length")]
    pub min_suggestion_length: usize,

    /// Ordered relay chain; the first endpoint is preferred at startup.
    #[serde(default = "default_relay_endpoints")]
    pub relays: Vec<RelayEndpoint>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_url: default_source_url(),
            relay_timeout_seconds: default_relay_timeout_seconds(),
            min_suggestion_length: default_min_suggestion_length(),
            relays: default_relay_endpoints(),
        }
    }
}

impl Config {
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        // Try to load .env file if it exists (for Docker and development)
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        let config_file = if let Some(path) = config_path {
            PathBuf::from(path)
        } else {
            Self::default_config_path()?
        };

        if config_file.exists() {
            let content = fs::read_to_string(&config_file)?;
            let file_config: Config = toml::from_str(&content)?;
            config = file_config;
        }

        // Environment variables win over the file
        config.load_from_env();

        if config.relays.is_empty() {
            warn!("No relay endpoints configured; restoring the default chain");
            config.relays = default_relay_endpoints();
        }

        // Save config file if it doesn't exist
        if !config_file.exists() {
            if let Some(parent) = config_file.parent() {
                fs::create_dir_all(parent)?;
            }
            config.save(&config_file)?;
        }

        Ok(config)
    }

    /// Load configuration from environment variables
    fn load_from_env(&mut self) {
        if let Ok(source_url) = env::var("TUNEDOCK_SOURCE_URL") {
            let trimmed = source_url.trim();
            if !trimmed.is_empty() {
                self.source_url = trimmed.to_string();
            }
        }

        if let Ok(timeout) = env::var("TUNEDOCK_RELAY_TIMEOUT_SECONDS") {
            if let Ok(value) = timeout.parse::<u64>() {
                self.relay_timeout_seconds = value;
            }
        }

        if let Ok(min_len) = env::var("TUNEDOCK_MIN_SUGGESTION_LENGTH") {
            if let Ok(value) = min_len.parse::<usize>() {
                self.min_suggestion_length = value;
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    fn default_config_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("io", "musicdock", "tunedock-cli")
            .ok_or_else(|| anyhow::anyhow!("Failed to determine project directories"))?;

        Ok(project_dirs.config_dir().join("config.toml"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Self::default_config_path()
    }

    /// Build the search client with the production transport. The shared
    /// relay-preference counter is created here, once per process.
    pub fn create_search_client(&self) -> ChosicClient {
        let router = RelayRouter::new(
            self.relays.clone(),
            Arc::new(AtomicUsize::new(0)),
            Arc::new(HttpTransport::new()),
            Duration::from_secs(self.relay_timeout_seconds),
        );
        ChosicClient::new(&self.source_url, router)
            .with_min_suggestion_prefix(self.min_suggestion_length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_deployment() {
        let config = Config::default();
        assert_eq!(config.source_url, PLAYLIST_GENERATOR_URL);
        assert_eq!(config.relays.len(), 3);
        assert_eq!(config.relay_timeout_seconds, 10);
        assert_eq!(config.min_suggestion_length, 2);
    }

    #[test]
    fn partial_config_file_fills_in_defaults() {
        let config: Config = toml::from_str("relay_timeout_seconds = 3\n").unwrap();
        assert_eq!(config.relay_timeout_seconds, 3);
        assert_eq!(config.relays.len(), 3);
        assert_eq!(config.source_url, PLAYLIST_GENERATOR_URL);
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.relays.len(), config.relays.len());
        assert_eq!(parsed.relays[0].name, "allorigins");
        assert_eq!(parsed.relays[0].envelope_field.as_deref(), Some("contents"));
    }
}
