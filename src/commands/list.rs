use anyhow::Result;
use castdir_core::{Stage, Studio};
use owo_colors::OwoColorize;

use crate::render;

pub fn run(studio: &Studio, stage: Option<&str>) -> Result<()> {
    let filter: Option<Stage> = stage.map(str::parse).transpose()?;

    let rows: Vec<_> = studio
        .contents()?
        .into_iter()
        .filter(|(_, content)| filter.map_or(true, |stage| content.stage == stage))
        .collect();

    if rows.is_empty() {
        match filter {
            Some(stage) => println!("  No content in stage '{}'", stage),
            None => println!(
                "  No content yet. Start with {} or {}",
                "castdir new".bold(),
                "castdir plan".bold()
            ),
        }
        return Ok(());
    }

    println!();
    for (slug, content) in &rows {
        println!(
            "  {} {:<40} {}",
            render::stage_cell(content.stage),
            slug,
            content.title
        );
    }
    println!();
    println!("  {} items", rows.len());

    Ok(())
}
