use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, TunediveError};

fn default_cache_ttl_seconds() -> u64 {
    3600
}

fn default_youtube_limit() -> usize {
    10
}

fn default_lastfm_limit() -> usize {
    5
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Last.fm API key (required for the Spotify similarity adapter)
    pub lastfm_api_key: Option<String>,

    /// Last.fm API base URL
    pub lastfm_base_url: String,

    /// YouTube Music InnerTube base URL
    pub youtube_base_url: String,

    /// How long adapter results are memoized, in seconds
    #[serde(default = "default_cache_ttl_seconds")]
    pub cache_ttl_seconds: u64,

    /// Maximum related tracks requested from YouTube Music
    #[serde(default = "default_youtube_limit")]
    pub youtube_limit: usize,

    /// Maximum similar tracks requested from Last.fm
    #[serde(default = "default_lastfm_limit")]
    pub lastfm_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lastfm_api_key: None,
            lastfm_base_url: "http://ws.audioscrobbler.com/2.0/".to_string(),
            youtube_base_url: "https://music.youtube.com/youtubei/v1".to_string(),
            cache_ttl_seconds: 3600,
            youtube_limit: 10,
            lastfm_limit: 5,
        }
    }
}

impl Config {
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        // Try to load .env file if it exists (for development setups)
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        let config_file = if let Some(path) = config_path {
            PathBuf::from(path)
        } else {
            Self::default_config_path()?
        };

        if config_file.exists() {
            let content = fs::read_to_string(&config_file)
                .map_err(|e| TunediveError::Config(ConfigError::Io(e)))?;
            let file_config: Config = toml::from_str(&content)?;
            config = file_config;
        }

        // Environment variables take precedence over the file
        config.load_from_env();

        // Save config file if it doesn't exist, so users have something to edit
        if !config_file.exists() {
            if let Some(parent) = config_file.parent() {
                fs::create_dir_all(parent)
                    .map_err(|e| TunediveError::Config(ConfigError::Io(e)))?;
            }
            config.save(&config_file)?;
        }

        Ok(config)
    }

    fn load_from_env(&mut self) {
        if let Ok(key) = env::var("TUNEDIVE_LASTFM_API_KEY") {
            let trimmed = key.trim().to_string();
            if !trimmed.is_empty() {
                self.lastfm_api_key = Some(trimmed);
            }
        }

        if let Ok(base) = env::var("TUNEDIVE_LASTFM_BASE_URL") {
            self.lastfm_base_url = base;
        }

        if let Ok(base) = env::var("TUNEDIVE_YOUTUBE_BASE_URL") {
            self.youtube_base_url = base;
        }

        if let Ok(ttl) = env::var("TUNEDIVE_CACHE_TTL_SECONDS") {
            if let Ok(value) = ttl.parse::<u64>() {
                self.cache_ttl_seconds = value;
            }
        }

        if let Ok(limit) = env::var("TUNEDIVE_YOUTUBE_LIMIT") {
            if let Ok(value) = limit.parse::<usize>() {
                self.youtube_limit = value;
            }
        }

        if let Ok(limit) = env::var("TUNEDIVE_LASTFM_LIMIT") {
            if let Ok(value) = limit.parse::<usize>() {
                self.lastfm_limit = value;
            }
        }
    }

    pub fn save(&self, path: &Path) -> crate::error::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| TunediveError::Internal(e.into()))?;
        fs::write(path, content).map_err(|e| TunediveError::Config(ConfigError::Io(e)))?;
        Ok(())
    }

    fn default_config_path() -> crate::error::Result<PathBuf> {
        let project_dirs = ProjectDirs::from("net", "tunedive", "tunedive")
            .ok_or_else(|| {
                TunediveError::Internal(anyhow::anyhow!(
                    "Failed to determine project directories"
                ))
            })?;

        Ok(project_dirs.config_dir().join("config.toml"))
    }

    pub fn config_path() -> crate::error::Result<PathBuf> {
        Self::default_config_path()
    }

    pub fn create_youtube_client(&self) -> crate::core::youtube::YoutubeClient {
        crate::core::youtube::YoutubeClient::new(&self.youtube_base_url, self.youtube_limit)
    }

    /// Requires an API key; the original service refuses key-less requests.
    pub fn create_lastfm_client(&self) -> Result<crate::core::lastfm::LastfmClient> {
        let api_key = self.lastfm_api_key.as_deref().ok_or_else(|| {
            anyhow::anyhow!(
                "Last.fm API key not configured; set TUNEDIVE_LASTFM_API_KEY or add \
                 lastfm_api_key to the config file"
            )
        })?;

        Ok(crate::core::lastfm::LastfmClient::new(
            &self.lastfm_base_url,
            api_key,
            self.lastfm_limit,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_service_endpoints() {
        let config = Config::default();
        assert_eq!(config.lastfm_base_url, "http://ws.audioscrobbler.com/2.0/");
        assert_eq!(config.youtube_base_url, "https://music.youtube.com/youtubei/v1");
        assert_eq!(config.cache_ttl_seconds, 3600);
        assert_eq!(config.youtube_limit, 10);
        assert_eq!(config.lastfm_limit, 5);
        assert!(config.lastfm_api_key.is_none());
    }

    #[test]
    fn lastfm_client_requires_api_key() {
        let config = Config::default();
        assert!(config.create_lastfm_client().is_err());

        let with_key = Config {
            lastfm_api_key: Some("abc123".to_string()),
            ..Config::default()
        };
        assert!(with_key.create_lastfm_client().is_ok());
    }

    #[test]
    fn config_roundtrips_through_toml() {
        let config = Config {
            lastfm_api_key: Some("abc123".to_string()),
            cache_ttl_seconds: 60,
            ..Config::default()
        };

        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.lastfm_api_key.as_deref(), Some("abc123"));
        assert_eq!(parsed.cache_ttl_seconds, 60);
    }
}
