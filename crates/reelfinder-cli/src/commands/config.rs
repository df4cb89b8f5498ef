use crate::output::{Output, OutputFormat};
use crate::ConfigCommands;
use clap::ValueEnum;
use color_eyre::Result;
use comfy_table::{Cell, Table};
use movie_browse_config::{Config, CredentialStore, PathManager};
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KeyService {
    Tmdb,
    Serpapi,
}

impl KeyService {
    fn credential_key(self) -> &'static str {
        match self {
            KeyService::Tmdb => "tmdb_api_key",
            KeyService::Serpapi => "serpapi_api_key",
        }
    }
}

pub fn run_config(cmd: ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show { full } => show_config(full, output),
        ConfigCommands::SetKey { service, value } => set_key(service, &value, output),
        ConfigCommands::ClearKey { service } => clear_key(service, output),
    }
}

fn load_store() -> Result<(PathManager, Config, CredentialStore)> {
    let paths = PathManager::new()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to determine application directories: {}", e))?;

    let config_file = paths.config_file();
    let config = Config::load_or_default(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e))?;

    let credentials_file = paths.credentials_file();
    let mut credentials = CredentialStore::new(credentials_file.clone());
    credentials
        .load()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e))?;

    Ok((paths, config, credentials))
}

fn show_config(full: bool, output: &Output) -> Result<()> {
    let (paths, config, credentials) = load_store()?;

    let tmdb_key = credentials.tmdb_api_key();
    let serpapi_key = credentials.serpapi_api_key();

    match output.format() {
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({
                "config_file": paths.config_file().display().to_string(),
                "metadata": {
                    "language": config.metadata.language,
                    "region": config.metadata.region,
                    "page_size": config.metadata.page_size,
                },
                "search": { "enabled": config.search.enabled },
                "server": { "port": config.server.port },
                "credentials": {
                    "tmdb_api_key": display_key(tmdb_key.as_deref(), full),
                    "serpapi_api_key": display_key(serpapi_key.as_deref(), full),
                },
            }));
            return Ok(());
        }
        OutputFormat::Human => {}
    }

    let mut info_table = Table::new();
    info_table.add_row(vec![
        Cell::new("Config File").add_attribute(comfy_table::Attribute::Bold),
        Cell::new(paths.config_file().display().to_string()),
    ]);
    info_table.add_row(vec![
        Cell::new("Credentials File").add_attribute(comfy_table::Attribute::Bold),
        Cell::new(paths.credentials_file().display().to_string()),
    ]);
    info_table.load_preset(comfy_table::presets::UTF8_FULL);
    info_table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    output.info(info_table.to_string());

    let mut settings_table = Table::new();
    settings_table.set_header(vec![
        Cell::new("Settings")
            .fg(comfy_table::Color::Cyan)
            .add_attribute(comfy_table::Attribute::Bold),
        Cell::new(""),
    ]);
    settings_table.add_row(vec!["Language".to_string(), config.metadata.language.clone()]);
    settings_table.add_row(vec!["Region".to_string(), config.metadata.region.clone()]);
    settings_table.add_row(vec![
        "Page Size".to_string(),
        config.metadata.page_size.to_string(),
    ]);
    settings_table.add_row(vec![
        "Watch-link Search".to_string(),
        if config.search.enabled { "enabled" } else { "disabled" }.to_string(),
    ]);
    settings_table.add_row(vec![
        "Server Port".to_string(),
        config.server.port.to_string(),
    ]);
    settings_table.load_preset(comfy_table::presets::UTF8_FULL);
    settings_table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    output.info(settings_table.to_string());

    let mut cred_table = Table::new();
    cred_table.set_header(vec![
        Cell::new("Credentials")
            .fg(comfy_table::Color::Cyan)
            .add_attribute(comfy_table::Attribute::Bold),
        Cell::new(""),
    ]);
    cred_table.add_row(vec![
        "TMDB API Key".to_string(),
        display_key(tmdb_key.as_deref(), full),
    ]);
    cred_table.add_row(vec![
        "SerpAPI Key".to_string(),
        display_key(serpapi_key.as_deref(), full),
    ]);
    cred_table.load_preset(comfy_table::presets::UTF8_FULL);
    cred_table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    output.info(cred_table.to_string());

    Ok(())
}

fn set_key(service: KeyService, value: &str, output: &Output) -> Result<()> {
    if value.trim().is_empty() {
        return Err(color_eyre::eyre::eyre!("Key value must not be empty"));
    }

    let (_, _, mut credentials) = load_store()?;
    credentials.set(service.credential_key().to_string(), value.trim().to_string());
    credentials
        .save()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save credentials: {}", e))?;

    output.success(format!("Stored {} key", service.credential_key()));
    Ok(())
}

fn clear_key(service: KeyService, output: &Output) -> Result<()> {
    let (_, _, mut credentials) = load_store()?;
    credentials.remove(service.credential_key());
    credentials
        .save()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save credentials: {}", e))?;

    output.success(format!("Removed {} key", service.credential_key()));
    Ok(())
}

/// Masked key display: last four characters only, unless --full.
fn display_key(key: Option<&str>, full: bool) -> String {
    match key {
        None => "(not set)".to_string(),
        Some(key) if full => key.to_string(),
        Some(key) => {
            let tail: String = key
                .chars()
                .rev()
                .take(4)
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect();
            format!("****{}", tail)
        }
    }
}
