use crate::commands::build_context;
use crate::output::{Output, OutputFormat};
use color_eyre::Result;
use comfy_table::{Cell, Table};

pub async fn run_genres(lang: Option<&str>, output: &Output) -> Result<()> {
    let mut ctx = build_context()?;
    let lang = lang.unwrap_or(&ctx.config.metadata.language).to_string();

    let genres = ctx
        .session
        .load_genres(&lang)
        .await
        .map_err(|e| color_eyre::eyre::eyre!("Failed to fetch genre list: {}", e))?;

    match output.format() {
        OutputFormat::Json | OutputFormat::JsonPretty => {
            let value = serde_json::to_value(&genres)
                .map_err(|e| color_eyre::eyre::eyre!("Failed to serialize genres: {}", e))?;
            output.json(&value);
        }
        OutputFormat::Human => {
            let mut table = Table::new();
            table.set_header(vec![
                Cell::new("Genre").add_attribute(comfy_table::Attribute::Bold),
                Cell::new("Id").add_attribute(comfy_table::Attribute::Bold),
            ]);
            for genre in &genres {
                table.add_row(vec![genre.name.clone(), genre.id.to_string()]);
            }
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            output.info(table.to_string());
        }
    }

    Ok(())
}
