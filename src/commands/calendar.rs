use anyhow::{bail, Context, Result};
use castdir_core::Studio;
use chrono::{Local, Months, NaiveDate};

use crate::render;

pub fn run(studio: &Studio, from: Option<&str>, to: Option<&str>) -> Result<()> {
    let today = Local::now().date_naive();

    let from = match from {
        Some(s) => parse_date(s)?,
        None => today,
    };
    let to = match to {
        Some(s) => parse_date(s)?,
        None => from
            .checked_add_months(Months::new(studio.config().planning.plan_months))
            .unwrap_or(from),
    };
    if to < from {
        bail!("--to must not be before --from");
    }

    let slots = studio.slots_between(from, to)?;
    if slots.is_empty() {
        println!("  No slots between {} and {}", from, to);
        return Ok(());
    }

    println!();
    for slot in &slots {
        // Promoted slots show the content title; planned ones the idea.
        let title = match slot.content_id {
            Some(id) => studio
                .find_content_by_id(id)
                .ok()
                .map(|(_, content)| content.title),
            None => slot
                .title_idea_id
                .and_then(|id| studio.find_title_idea(id).ok())
                .map(|(_, idea)| idea.title),
        };
        println!("{}", render::slot_line(slot, title.as_deref()));
    }
    println!();
    println!("  {} slots between {} and {}", slots.len(), from, to);

    Ok(())
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}'. Expected YYYY-MM-DD", s))
}
