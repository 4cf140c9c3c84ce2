use anyhow::{Context, Result};
use castdir_core::{Content, ContentType, SlotStatus, Studio, TitleStatus};
use chrono::NaiveDate;
use owo_colors::OwoColorize;

pub fn run(studio: &Studio, date: &str) -> Result<()> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}'. Expected YYYY-MM-DD", date))?;

    let mut slot = studio.slot_on(date)?;

    // Already promoted: report the existing item instead of duplicating.
    if let Some(content_id) = slot.content_id {
        let (slug, _) = studio.find_content_by_id(content_id)?;
        println!("  Slot {} already promoted: {}", date, slug.bold());
        return Ok(());
    }

    let idea = match slot.title_idea_id {
        Some(id) => Some(studio.find_title_idea(id)?),
        None => None,
    };

    let title = idea
        .as_ref()
        .map(|(_, idea)| idea.title.clone())
        .unwrap_or_else(|| "Untitled".to_string());

    let mut content = Content::new(title, ContentType::Video);
    content.due_date = Some(date);
    let slug = studio.create_content(&content)?;

    if let Some((idea_slug, mut idea)) = idea {
        idea.status = TitleStatus::Promoted;
        idea.content_id = Some(content.id);
        studio.save_title_idea(&idea_slug, &idea)?;
    }

    slot.content_id = Some(content.id);
    slot.status = SlotStatus::InProgress;
    studio.save_slot(&slot)?;

    println!("{}", format!("  Promoted {} → {}", date, slug).green());
    Ok(())
}
