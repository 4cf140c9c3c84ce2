use anyhow::Result;
use castdir_core::config::CreatorProfile;
use castdir_core::Studio;
use dialoguer::Input;
use owo_colors::OwoColorize;

pub fn run(
    mut studio: Studio,
    niche: Option<String>,
    channel_goal: Option<String>,
    tone: Option<String>,
    audience: Option<String>,
    edit: bool,
) -> Result<()> {
    let mut config = studio.config().clone();
    let changed = niche.is_some() || channel_goal.is_some() || tone.is_some() || audience.is_some();

    if let Some(niche) = niche {
        config.profile.niche = niche;
    }
    if let Some(goal) = channel_goal {
        config.profile.channel_goal = goal;
    }
    if let Some(tone) = tone {
        config.profile.tone = tone;
    }
    if let Some(audience) = audience {
        config.profile.audience = audience;
    }

    if edit {
        config.profile.niche = prompt("  Niche", &config.profile.niche)?;
        config.profile.channel_goal = prompt("  Channel goal", &config.profile.channel_goal)?;
        config.profile.tone = prompt("  Tone", &config.profile.tone)?;
        config.profile.audience = prompt("  Audience", &config.profile.audience)?;
    }

    if changed || edit {
        studio.update_config(config.clone())?;
        println!("{}", "  Profile saved".green());
    }

    render(&config.profile);
    Ok(())
}

/// Prompt with the current value as the default, allowing empty answers.
fn prompt(label: &str, current: &str) -> Result<String> {
    let value: String = Input::<String>::new()
        .with_prompt(label)
        .default(current.to_string())
        .show_default(!current.is_empty())
        .allow_empty(true)
        .interact_text()?;
    Ok(value)
}

fn render(profile: &CreatorProfile) {
    println!();
    println!("  Niche:         {}", field(&profile.niche));
    println!("  Channel goal:  {}", field(&profile.channel_goal));
    println!("  Tone:          {}", field(&profile.tone));
    println!("  Audience:      {}", field(&profile.audience));

    if !profile.is_complete() {
        println!();
        println!(
            "  {}",
            "Niche and channel goal are required before generating titles.".yellow()
        );
    }
}

fn field(value: &str) -> String {
    if value.is_empty() {
        "—".dimmed().to_string()
    } else {
        value.to_string()
    }
}
