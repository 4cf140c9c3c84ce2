use anyhow::{bail, Result};
use castdir_core::constants::MAX_VIDEOS_PER_WEEK;
use castdir_core::genlog::{GenerationRecord, Operation};
use castdir_core::{assign_titles, PlanRequest, Studio, TitleIdea};
use chrono::Local;
use owo_colors::OwoColorize;
use uuid::Uuid;

use crate::providers::claude::{Claude, TitleRequest};
use crate::render;

pub struct PlanArgs {
    pub videos_per_week: Option<u32>,
    pub months: Option<u32>,
    pub count: usize,
    pub style: String,
    pub duration: Option<u32>,
    pub topic: Option<String>,
    pub no_titles: bool,
}

pub async fn run(studio: &Studio, args: PlanArgs) -> Result<()> {
    let config = studio.config();

    // Flags are range-checked by clap; values falling back to the config
    // file still need validating here.
    let videos_per_week = args
        .videos_per_week
        .unwrap_or(config.planning.videos_per_week);
    if videos_per_week < 1 || videos_per_week > MAX_VIDEOS_PER_WEEK {
        bail!(
            "videos_per_week must be between 1 and {} (config has {})",
            MAX_VIDEOS_PER_WEEK,
            videos_per_week
        );
    }

    let plan_months = args.months.unwrap_or(config.planning.plan_months);
    if plan_months < 1 {
        bail!("plan_months must be at least 1 (config has {})", plan_months);
    }

    let request = PlanRequest {
        videos_per_week,
        plan_months,
        reference_date: Local::now().date_naive(),
    };
    let dates = request.slot_dates();

    if dates.is_empty() {
        println!("  Nothing to book: the horizon ends before the first plannable day.");
        return Ok(());
    }

    let title_ids = if args.no_titles {
        Vec::new()
    } else {
        generate_title_ideas(studio, &args).await?
    };

    let slots = assign_titles(&dates, &title_ids);

    let mut created = 0;
    let mut skipped = 0;
    for slot in &slots {
        if studio.create_slot(slot)? {
            created += 1;
            let title = slot
                .title_idea_id
                .and_then(|id| studio.find_title_idea(id).ok())
                .map(|(_, idea)| idea.title);
            println!("{}", render::slot_line(slot, title.as_deref()));
        } else {
            skipped += 1;
        }
    }

    println!();
    let end = request
        .end_date()
        .map(|date| date.to_string())
        .unwrap_or_default();
    println!("{}", format!("  Booked {} dates through {}", created, end).green());
    if skipped > 0 {
        println!(
            "{}",
            format!("  Skipped {} already-booked dates", skipped).yellow()
        );
    }

    Ok(())
}

/// Generate titles via the model, persist them as title ideas, and return
/// their ids in generation order (the order slots are assigned in).
async fn generate_title_ideas(studio: &Studio, args: &PlanArgs) -> Result<Vec<Uuid>> {
    let profile = &studio.config().profile;
    if !profile.is_complete() {
        bail!("Complete your profile first: castdir profile --edit");
    }

    let claude = Claude::from_env()?;
    let request = TitleRequest {
        count: args.count,
        video_style: args.style.clone(),
        target_duration_minutes: args.duration,
        topic_override: args.topic.clone(),
    };

    let spinner = render::spinner("Generating titles...");
    let result = claude.generate_titles(profile, &request).await;
    spinner.finish_and_clear();
    let (titles, completion) = result?;

    studio.append_generation(&GenerationRecord::new(
        Operation::GenerateTitles,
        completion.model.as_str(),
        completion.input_tokens,
        completion.output_tokens,
    ))?;

    println!("  Generated {} titles", titles.len());

    let mut ids = Vec::with_capacity(titles.len());
    for title in titles {
        let idea = TitleIdea::new(title, args.style.clone(), args.duration);
        studio.create_title_idea(&idea)?;
        ids.push(idea.id);
    }
    Ok(ids)
}
