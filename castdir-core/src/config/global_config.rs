//! Global castdir configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CastdirError, CastdirResult};

static DEFAULT_STUDIO_PATH: &str = "~/studio";

fn default_studio_path() -> PathBuf {
    PathBuf::from(DEFAULT_STUDIO_PATH)
}

/// Global configuration at ~/.config/castdir/config.toml
///
/// Studio-specific configuration (channel, profile, planning defaults) is
/// stored in the studio's .castdir/config.toml file instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default = "default_studio_path")]
    pub studio_dir: PathBuf,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        GlobalConfig {
            studio_dir: default_studio_path(),
        }
    }
}

impl GlobalConfig {
    pub fn config_path() -> CastdirResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CastdirError::Config("Could not determine config directory".into()))?
            .join("castdir");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the global config, falling back to defaults when the file
    /// doesn't exist yet.
    pub fn load() -> CastdirResult<Self> {
        let path = Self::config_path()?;

        let config: GlobalConfig = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .build()
            .map_err(|e| CastdirError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CastdirError::Config(e.to_string()))?;

        Ok(config)
    }

    pub fn save(&self) -> CastdirResult<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let body = toml::to_string_pretty(self)
            .map_err(|e| CastdirError::Serialization(e.to_string()))?;
        std::fs::write(&path, body)?;
        Ok(())
    }

    /// The studio directory with `~` expanded.
    pub fn studio_path(&self) -> PathBuf {
        expand_tilde(&self.studio_dir)
    }

    /// The studio directory in display-friendly form, keeping `~` instead
    /// of the full home directory.
    pub fn display_path(&self) -> &Path {
        &self.studio_dir
    }
}

pub(crate) fn expand_tilde(path: &Path) -> PathBuf {
    let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
    PathBuf::from(expanded)
}
