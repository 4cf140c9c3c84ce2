use anyhow::Result;
use castdir_core::{Stage, Studio};

use crate::render::Render;

pub fn run(studio: &Studio, key: &str, stage: &str) -> Result<()> {
    let target: Stage = stage.parse()?;
    let (slug, mut content) = studio.find_content(key)?;

    let from = content.stage;
    if from == target {
        println!("  {} is already in stage '{}'", content.title, target);
        return Ok(());
    }

    content.set_stage(target);
    studio.save_content(&slug, &content)?;

    println!(
        "  {}: {} → {}",
        content.title,
        from.render(),
        target.render()
    );
    Ok(())
}
