//! Title ideas generated ahead of production.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleStatus {
    #[default]
    Suggested,
    Promoted,
}

/// A generated video title waiting to be assigned and produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleIdea {
    pub id: Uuid,
    pub title: String,

    /// Free-form style tag, e.g. "how_to" or "case_study".
    pub video_style: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_duration_minutes: Option<u32>,

    #[serde(default)]
    pub status: TitleStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_id: Option<Uuid>,

    pub created_at: DateTime<Utc>,
}

impl TitleIdea {
    pub fn new(
        title: impl Into<String>,
        video_style: impl Into<String>,
        target_duration_minutes: Option<u32>,
    ) -> Self {
        TitleIdea {
            id: Uuid::new_v4(),
            title: title.into(),
            video_style: video_style.into(),
            target_duration_minutes,
            status: TitleStatus::Suggested,
            content_id: None,
            created_at: Utc::now(),
        }
    }
}
