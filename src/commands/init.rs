use std::path::PathBuf;

use anyhow::Result;
use castdir_core::config::GlobalConfig;
use castdir_core::Studio;
use owo_colors::OwoColorize;

pub fn run(path: Option<PathBuf>) -> Result<()> {
    let mut global = GlobalConfig::load()?;

    // An explicit path becomes the configured studio location.
    if let Some(path) = path {
        global.studio_dir = path;
        global.save()?;
    }

    let studio = Studio::init(global.studio_path())?;

    println!(
        "{}",
        format!("  Studio ready at {}", studio.root().display()).green()
    );
    println!(
        "  Next: set up your profile with {}",
        "castdir profile --edit".bold()
    );

    Ok(())
}
