pub mod config;
pub mod discover;
pub mod genres;
pub mod render;
pub mod search;

use color_eyre::Result;
use movie_browse_config::{Config, CredentialStore, PathManager};
use movie_browse_core::BrowseSession;

pub struct AppContext {
    pub config: Config,
    pub session: BrowseSession,
}

/// Load config and credentials from disk and wire up a browse session.
pub fn build_context() -> Result<AppContext> {
    let paths = PathManager::new()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to determine application directories: {}", e))?;

    let config_file = paths.config_file();
    let config = Config::load_or_default(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
    config
        .validate()
        .map_err(|e| color_eyre::eyre::eyre!("Invalid configuration: {}", e))?;

    let credentials_file = paths.credentials_file();
    let mut credentials = CredentialStore::new(credentials_file.clone());
    credentials
        .load()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e))?;

    let session = BrowseSession::from_config(&config, &credentials)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to initialize API clients: {}", e))?;

    Ok(AppContext { config, session })
}
