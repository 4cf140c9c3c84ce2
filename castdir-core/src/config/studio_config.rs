//! Studio-local configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PLAN_MONTHS, DEFAULT_VIDEOS_PER_WEEK};
use crate::error::{CastdirError, CastdirResult};

/// Creator profile used to steer model generations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatorProfile {
    #[serde(default)]
    pub niche: String,
    #[serde(default)]
    pub channel_goal: String,
    #[serde(default)]
    pub tone: String,
    #[serde(default)]
    pub audience: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ctas: Vec<String>,
}

impl CreatorProfile {
    /// Niche and channel goal are the minimum the generators need.
    pub fn is_complete(&self) -> bool {
        !self.niche.is_empty() && !self.channel_goal.is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChannelConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube_channel_id: Option<String>,
}

fn default_videos_per_week() -> u32 {
    DEFAULT_VIDEOS_PER_WEEK
}

fn default_plan_months() -> u32 {
    DEFAULT_PLAN_MONTHS
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanningConfig {
    #[serde(default = "default_videos_per_week")]
    pub videos_per_week: u32,
    #[serde(default = "default_plan_months")]
    pub plan_months: u32,
}

impl Default for PlanningConfig {
    fn default() -> Self {
        PlanningConfig {
            videos_per_week: DEFAULT_VIDEOS_PER_WEEK,
            plan_months: DEFAULT_PLAN_MONTHS,
        }
    }
}

/// Where blog drafts get republished. The access token is not stored
/// here; it comes from SHOPIFY_ADMIN_ACCESS_TOKEN in the environment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShopifyConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blog_id: Option<String>,
}

/// Configuration at <studio>/.castdir/config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudioConfig {
    #[serde(default)]
    pub channel: ChannelConfig,
    #[serde(default)]
    pub profile: CreatorProfile,
    #[serde(default)]
    pub planning: PlanningConfig,
    #[serde(default)]
    pub shopify: ShopifyConfig,
}

impl StudioConfig {
    pub fn path_for(studio_dir: &Path) -> PathBuf {
        studio_dir.join(".castdir").join("config.toml")
    }

    /// Load the studio config, falling back to defaults when the file
    /// doesn't exist yet.
    pub fn load(studio_dir: &Path) -> CastdirResult<Self> {
        let path = Self::path_for(studio_dir);
        if !path.exists() {
            return Ok(StudioConfig::default());
        }

        let content = std::fs::read_to_string(&path)?;
        toml::from_str(&content)
            .map_err(|e| CastdirError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn save(&self, studio_dir: &Path) -> CastdirResult<()> {
        let path = Self::path_for(studio_dir);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let body = toml::to_string_pretty(self)
            .map_err(|e| CastdirError::Serialization(e.to_string()))?;

        let tmp = path.with_extension("toml.tmp");
        std::fs::write(&tmp, body)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = StudioConfig::load(dir.path()).unwrap();
        assert_eq!(config.planning.videos_per_week, DEFAULT_VIDEOS_PER_WEEK);
        assert!(!config.profile.is_complete());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();

        let mut config = StudioConfig::default();
        config.profile.niche = "woodworking".to_string();
        config.profile.channel_goal = "teach joinery".to_string();
        config.channel.youtube_channel_id = Some("UCabc123".to_string());
        config.save(dir.path()).unwrap();

        let loaded = StudioConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.profile.niche, "woodworking");
        assert!(loaded.profile.is_complete());
        assert_eq!(
            loaded.channel.youtube_channel_id.as_deref(),
            Some("UCabc123")
        );
    }
}
