use anyhow::Result;
use castdir_core::Studio;
use owo_colors::OwoColorize;

use crate::render::Render;

pub fn run(studio: &Studio, key: &str) -> Result<()> {
    let (slug, content) = studio.find_content(key)?;

    println!();
    println!("  {}", content.title.bold());
    println!("  {}", slug.dimmed());
    println!();
    println!("  Stage:    {}", content.stage.render());
    println!("  Type:     {}", content.content_type);
    println!("  Source:   {}", content.source);
    if let Some(due) = content.due_date {
        println!("  Due:      {}", due);
    }
    if !content.tags.is_empty() {
        println!("  Tags:     {}", content.tags.join(", "));
    }

    println!();
    println!("  Brief:    {}", body_summary(content.brief.as_deref()));
    println!("  Script:   {}", body_summary(content.script.as_deref()));
    println!("  Blog:     {}", body_summary(content.blog_body.as_deref()));
    if let Some(seo_title) = &content.seo_title {
        println!("  SEO:      {}", seo_title);
    }

    println!();
    println!(
        "  {}",
        format!(
            "created {}  ·  updated {}",
            content.created_at.format("%Y-%m-%d"),
            content.updated_at.format("%Y-%m-%d")
        )
        .dimmed()
    );

    Ok(())
}

fn body_summary(body: Option<&str>) -> String {
    match body {
        Some(text) if !text.is_empty() => format!("{} chars", text.chars().count()),
        _ => "—".dimmed().to_string(),
    }
}
