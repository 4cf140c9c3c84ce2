use anyhow::Result;
use castdir_core::{Content, ContentType, Studio};
use owo_colors::OwoColorize;

pub fn run(
    studio: &Studio,
    title: String,
    niche: Option<String>,
    notes: Option<String>,
) -> Result<()> {
    let mut content = Content::new(title, ContentType::Video);
    if let Some(niche) = niche {
        content.tags = vec![niche];
    }
    content.brief = notes.filter(|notes| !notes.is_empty());

    let slug = studio.create_content(&content)?;

    println!(
        "{}",
        format!("  Created: {} ({})", content.title, slug).green()
    );
    Ok(())
}
