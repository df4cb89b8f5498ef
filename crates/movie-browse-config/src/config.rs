use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub metadata: MetadataConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Metadata-provider defaults: result language, watch-provider region, and
/// how many results get the expensive per-item enrichment.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MetadataConfig {
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

/// Web-search ("where to watch") provider toggle. The feature is also gated
/// on a SerpAPI key being present; `enabled = false` turns it off even when
/// a key is configured.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SearchConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// Listen port for a hosting process. Not used by the core crates.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_language() -> String {
    std::env::var("DEFAULT_LANG").unwrap_or_else(|_| "en".to_string())
}

fn default_region() -> String {
    std::env::var("REGION").unwrap_or_else(|_| "US".to_string())
}

fn default_page_size() -> usize {
    12
}

fn default_true() -> bool {
    true
}

fn default_port() -> u16 {
    std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(7861)
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            region: default_region(),
            page_size: default_page_size(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file if it exists, otherwise fall back to defaults
    /// (which themselves honor DEFAULT_LANG / REGION / PORT).
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.metadata.language.is_empty() {
            return Err(anyhow::anyhow!("metadata.language cannot be empty"));
        }
        if self.metadata.region.is_empty() {
            return Err(anyhow::anyhow!("metadata.region cannot be empty"));
        }
        if self.metadata.page_size == 0 {
            return Err(anyhow::anyhow!("metadata.page_size must be at least 1"));
        }
        Ok(())
    }
}
