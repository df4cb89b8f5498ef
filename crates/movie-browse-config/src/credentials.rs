use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize, Default)]
struct CredentialsData {
    #[serde(flatten)]
    data: HashMap<String, String>,
}

/// Flat key/value credential file. Environment variables take precedence
/// over stored values so container deployments can skip the file entirely.
pub struct CredentialStore {
    path: PathBuf,
    credentials: HashMap<String, String>,
}

impl CredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            credentials: HashMap::new(),
        }
    }

    pub fn load(&mut self) -> Result<()> {
        if self.path.exists() {
            let content = std::fs::read_to_string(&self.path)?;
            let creds_data: CredentialsData = toml::from_str(&content)?;
            self.credentials = creds_data.data;
        }
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let creds_data = CredentialsData {
            data: self.credentials.clone(),
        };
        let content = toml::to_string_pretty(&creds_data)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.credentials.get(key)
    }

    pub fn set(&mut self, key: String, value: String) {
        self.credentials.insert(key, value);
    }

    pub fn remove(&mut self, key: &str) {
        self.credentials.remove(key);
    }

    fn resolve(&self, env_var: &str, key: &str) -> Option<String> {
        std::env::var(env_var)
            .ok()
            .filter(|v| !v.is_empty())
            .or_else(|| self.get(key).cloned())
    }

    // Convenience methods for specific credentials

    /// Metadata-provider key: TMDB_API_KEY overrides the stored value.
    pub fn tmdb_api_key(&self) -> Option<String> {
        self.resolve("TMDB_API_KEY", "tmdb_api_key")
    }

    pub fn set_tmdb_api_key(&mut self, key: String) {
        self.set("tmdb_api_key".to_string(), key);
    }

    /// Web-search key: SERPAPI_API_KEY overrides the stored value. Absence
    /// disables the "where to watch" feature rather than being an error.
    pub fn serpapi_api_key(&self) -> Option<String> {
        self.resolve("SERPAPI_API_KEY", "serpapi_api_key")
    }

    pub fn set_serpapi_api_key(&mut self, key: String) {
        self.set("serpapi_api_key".to_string(), key);
    }
}
