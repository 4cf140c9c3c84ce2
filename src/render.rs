//! Colored terminal rendering for castdir types.

use castdir_core::{CalendarSlot, SlotStatus, Stage};
use indicatif::ProgressBar;
use owo_colors::OwoColorize;

/// Extension trait for terminal rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Stage {
    fn render(&self) -> String {
        colorize_stage(*self, self.as_str())
    }
}

impl Render for SlotStatus {
    fn render(&self) -> String {
        match self {
            SlotStatus::Planned => "·".dimmed().to_string(),
            SlotStatus::InProgress => "▶".yellow().to_string(),
        }
    }
}

/// Colorize text according to the stage it describes.
fn colorize_stage(stage: Stage, text: &str) -> String {
    match stage {
        Stage::Idea | Stage::Brief | Stage::Archived => text.dimmed().to_string(),
        Stage::Script | Stage::Record | Stage::Edit => text.blue().to_string(),
        Stage::Review => text.yellow().to_string(),
        Stage::Publish => text.green().to_string(),
        Stage::Distribute => text.cyan().to_string(),
    }
}

/// Fixed-width stage column (padded before coloring, so ANSI codes don't
/// break the alignment).
pub fn stage_cell(stage: Stage) -> String {
    colorize_stage(stage, &format!("{:<10}", stage.as_str()))
}

/// One calendar row: status marker, date, then the planned title (or an
/// open-slot placeholder).
pub fn slot_line(slot: &CalendarSlot, title: Option<&str>) -> String {
    let label = match title {
        Some(title) => title.to_string(),
        None => "(open slot)".dimmed().to_string(),
    };

    format!(
        "  {} {}  {}",
        slot.status.render(),
        slot.slot_date.to_string().bold(),
        label
    )
}

/// Spinner shown while a model call is in flight.
pub fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_message(message.to_string());
    bar.enable_steady_tick(std::time::Duration::from_millis(100));
    bar
}
