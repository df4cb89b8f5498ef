use crate::commands::{build_context, render};
use crate::output::Output;
use color_eyre::Result;

pub async fn run_discover(
    genres: &[String],
    original_language: Option<&str>,
    page: u32,
    page_size: Option<usize>,
    lang: Option<&str>,
    output: &Output,
) -> Result<()> {
    let mut ctx = build_context()?;
    let lang = lang.unwrap_or(&ctx.config.metadata.language).to_string();
    let page_size = page_size.unwrap_or(ctx.config.metadata.page_size);

    let spinner = render::page_spinner(output, "Browsing...");
    let result = ctx
        .session
        .discover(genres, &lang, original_language, page, page_size)
        .await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    render::render_page(&result, output)
}
