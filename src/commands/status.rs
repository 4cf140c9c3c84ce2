use anyhow::Result;
use castdir_core::{Stage, Studio};
use chrono::{Duration, Local};
use owo_colors::OwoColorize;

use crate::render::Render;

pub fn run(studio: &Studio) -> Result<()> {
    let contents = studio.contents()?;
    let today = Local::now().date_naive();

    println!();
    println!("  {}", studio.root().display().to_string().bold());
    println!();

    if contents.is_empty() {
        println!(
            "  No content yet. Start with {} or {}",
            "castdir new".bold(),
            "castdir plan".bold()
        );
    } else {
        for stage in Stage::ALL {
            let count = contents
                .iter()
                .filter(|(_, content)| content.stage == stage)
                .count();
            if count > 0 {
                println!("  {:>3}  {}", count, stage.render());
            }
        }
    }

    let horizon = today + Duration::days(14);
    let upcoming = studio.slots_between(today, horizon)?;
    let open = upcoming
        .iter()
        .filter(|slot| slot.content_id.is_none())
        .count();

    println!();
    println!(
        "  {} slots in the next 14 days ({} open)",
        upcoming.len(),
        open
    );

    let waiting = studio
        .videos()?
        .iter()
        .filter(|video| video.transcript_pending())
        .count();
    if waiting > 0 {
        println!("  {} videos waiting for transcripts", waiting);
    }

    Ok(())
}
