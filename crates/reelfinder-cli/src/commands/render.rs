use crate::output::{Output, OutputFormat};
use color_eyre::Result;
use comfy_table::{Cell, Table};
use indicatif::{ProgressBar, ProgressStyle};
use movie_browse_models::{EnrichedMovie, PageResult};
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use std::time::Duration;

/// Spinner shown while a page is fetched and enriched. None in quiet or
/// JSON mode, or when stdout is not a terminal.
pub fn page_spinner(output: &Output, msg: &str) -> Option<ProgressBar> {
    if output.is_quiet()
        || output.format() != OutputFormat::Human
        || !std::io::stdout().is_terminal()
    {
        return None;
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    spinner.set_message(msg.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    Some(spinner)
}

pub fn render_page(result: &PageResult, output: &Output) -> Result<()> {
    match output.format() {
        OutputFormat::Json | OutputFormat::JsonPretty => {
            let value = serde_json::to_value(result)
                .map_err(|e| color_eyre::eyre::eyre!("Failed to serialize results: {}", e))?;
            output.json(&value);
            return Ok(());
        }
        OutputFormat::Human => {}
    }

    output.info(&result.message);
    if result.items.is_empty() {
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("Title").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Year").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Rating").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Where to watch").add_attribute(comfy_table::Attribute::Bold),
    ]);
    for movie in &result.items {
        table.add_row(vec![
            movie.title.clone(),
            year_of(movie).unwrap_or("-").to_string(),
            format!("{:.1}", movie.vote_average),
            provider_names(movie),
        ]);
    }
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    output.info(table.to_string());

    for movie in &result.items {
        let mut lines = Vec::new();
        if let Some(key) = &movie.trailer_key {
            lines.push(format!(
                "  Trailer: https://www.youtube.com/watch?v={}",
                key
            ));
        }
        for link in &movie.links {
            lines.push(format!("  {}: {}", link.label, link.url));
        }
        if !lines.is_empty() {
            output.info(format!("{}", movie.title.cyan().bold()));
            for line in lines {
                output.info(line);
            }
        }
    }

    if result.total_pages > 1 {
        output.info(format!(
            "Page {} of {} ({} results total)",
            result.page, result.total_pages, result.total_results
        ));
    }

    Ok(())
}

fn year_of(movie: &EnrichedMovie) -> Option<&str> {
    let year = movie.release_date.get(..4)?;
    if year.is_empty() {
        None
    } else {
        Some(year)
    }
}

fn provider_names(movie: &EnrichedMovie) -> String {
    if movie.providers.is_empty() {
        return "-".to_string();
    }
    movie
        .providers
        .iter()
        .map(|p| p.provider_name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
