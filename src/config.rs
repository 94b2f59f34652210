use crate::gallery::{Collection, SortMode, DEFAULT_PRECEDENCE, DEFAULT_TTL};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Overrides the config file location
pub const CONFIG_ENV: &str = "GLOWGALLERY_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub gallery: GalleryConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default = "default_collections")]
    pub collections: Vec<Collection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryConfig {
    /// Metadata file, media directory or http(s) URL
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub sort: SortMode,
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    /// Collection order of the unfiltered view
    #[serde(default = "default_precedence")]
    pub precedence: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Relay endpoint taking `{messages}` and answering `{message}`.
    /// When unset the model API is called directly.
    pub relay_url: Option<String>,
    pub base_url: String,
    pub model: String,
    pub persona: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub presence_penalty: f64,
    pub frequency_penalty: f64,
}

fn default_cache_ttl_secs() -> u64 {
    DEFAULT_TTL.as_secs()
}

fn default_precedence() -> Vec<String> {
    DEFAULT_PRECEDENCE.iter().map(|s| s.to_string()).collect()
}

fn default_collections() -> Vec<Collection> {
    vec![
        Collection::new("MACHINE GARDEN", "machine garden", "machine garden/thumbnail.mp4"),
        Collection::new("BOB IS DED", "bob is ded", "bob is ded/thumbnail.gif"),
        Collection::new("BURGERS", "burgers", "burgers/thumbnail.gif"),
        Collection::new("FUN GUYS", "fun guys", "fun guys/thumbnail.gif"),
        Collection::new("GENESIS", "genesis", "genesis/thumbnail.png"),
    ]
}

const DEFAULT_PERSONA: &str = "You are a casual, humorous blogger who writes in Singlish with a mix of internet slang. \
You use expressions like 'lah', 'lor', 'leh', emoticons like ':D', ':P', 'o_O', and often include 'LOL' or 'HAHAHA'. \
You write in a stream-of-consciousness style, sometimes going off on random tangents. \
You're sarcastic, playful, and don't take things too seriously. \
You often use casual internet spelling like 'dun', 'naoadays', and mix English with simple Chinese phrases.";

impl Default for Config {
    fn default() -> Self {
        Self {
            gallery: GalleryConfig::default(),
            chat: ChatConfig::default(),
            collections: default_collections(),
        }
    }
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            source: None,
            sort: SortMode::Source,
            cache_ttl_secs: default_cache_ttl_secs(),
            precedence: default_precedence(),
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            relay_url: None,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            persona: DEFAULT_PERSONA.to_string(),
            temperature: 1.0,
            max_tokens: 2048,
            presence_penalty: 0.6,
            frequency_penalty: 0.6,
        }
    }
}

impl GalleryConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

impl Config {
    /// Return the path to the configuration file.
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return PathBuf::from(path);
        }

        directories::ProjectDirs::from("art", "glowburger", "glowgallery")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
            .join("config.toml")
    }

    /// Load config from file, creating default if missing or corrupt.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if path.exists() {
            let data = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            match toml::from_str::<Config>(&data) {
                Ok(config) => Ok(config),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "failed to parse config");
                    eprintln!("Warning: Failed to parse config at {}: {}", path.display(), e);
                    eprintln!("Using default configuration.");
                    let config = Config::default();
                    config.save()?;
                    Ok(config)
                }
            }
        } else {
            // Create default config.
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save config to file.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let data = toml::to_string_pretty(self)?;
        fs::write(&path, data)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;

        Ok(())
    }
}
