use anyhow::Result;
use castdir_core::genlog::{GenerationRecord, Operation};
use castdir_core::{Stage, Studio};
use owo_colors::OwoColorize;

use crate::providers::claude::Claude;
use crate::render;

pub async fn run(studio: &Studio, key: &str) -> Result<()> {
    let (slug, mut content) = studio.find_content(key)?;
    let claude = Claude::from_env()?;
    let profile = &studio.config().profile;

    // The promoted title idea, if any, carries the target duration.
    let duration = studio
        .title_ideas()?
        .into_iter()
        .find(|(_, idea)| idea.content_id == Some(content.id))
        .and_then(|(_, idea)| idea.target_duration_minutes);

    let spinner = render::spinner("Drafting script...");
    let result = claude
        .generate_script(&content.title, content.brief.as_deref(), duration, profile)
        .await;
    spinner.finish_and_clear();
    let completion = result?;

    studio.append_generation(
        &GenerationRecord::new(
            Operation::GenerateScript,
            completion.model.as_str(),
            completion.input_tokens,
            completion.output_tokens,
        )
        .for_content(content.id),
    )?;

    let chars = completion.text.chars().count();
    content.script = Some(completion.text);
    content.set_stage(Stage::Script);
    studio.save_content(&slug, &content)?;

    println!(
        "{}",
        format!("  Script drafted for '{}' ({} chars)", content.title, chars).green()
    );
    Ok(())
}
